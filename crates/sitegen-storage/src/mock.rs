//! In-memory filesystem for testing.
//!
//! Provides [`MemoryFileSystem`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{FileKind, FileSystem, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
    Other,
}

/// A path with no parent (`/` or the empty path) always exists as a directory.
fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

fn error(kind: StorageErrorKind, path: &Path) -> StorageError {
    StorageError::new(kind)
        .with_path(path)
        .with_backend(BACKEND)
}

/// In-memory filesystem.
///
/// Entries live in a sorted map keyed by full path, so directory listings come
/// out in file-name order just like [`OsFileSystem`](crate::OsFileSystem).
/// Use the builder methods to seed test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use sitegen_storage::{FileSystem, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/content/a.md", "# Hi")
///     .with_dir("/output/old");
///
/// assert!(fs.stat(Path::new("/content")).unwrap().is_dir());
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    write_failures: RwLock<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    /// Create a new empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file, creating any missing parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let path: PathBuf = path.into();
        {
            let mut nodes = self.nodes.write().unwrap();
            if let Some(parent) = path.parent() {
                insert_dirs(&mut nodes, parent);
            }
            nodes.insert(path, Node::File(content.into()));
        }
        self
    }

    /// Add a directory and any missing ancestors.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        insert_dirs(&mut self.nodes.write().unwrap(), &path.into());
        self
    }

    /// Add a non-regular entry (stands in for a symlink or socket).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_other(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        {
            let mut nodes = self.nodes.write().unwrap();
            if let Some(parent) = path.parent() {
                insert_dirs(&mut nodes, parent);
            }
            nodes.insert(path, Node::Other);
        }
        self
    }

    /// Make every mutation at or below `path` fail with `PermissionDenied`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_write_failure(self, path: impl Into<PathBuf>) -> Self {
        self.write_failures.write().unwrap().push(path.into());
        self
    }

    /// Content of a regular file, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.read().unwrap().get(path.as_ref()) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Content of a regular file as UTF-8 text, if present.
    #[must_use]
    pub fn file_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Check whether a directory exists at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        is_root(path) || matches!(self.nodes.read().unwrap().get(path), Some(Node::Dir))
    }

    /// All regular file paths, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes
            .read()
            .unwrap()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn check_writable(&self, path: &Path) -> Result<(), StorageError> {
        let blocked = self
            .write_failures
            .read()
            .unwrap()
            .iter()
            .any(|prefix| path.starts_with(prefix));
        if blocked {
            return Err(error(StorageErrorKind::PermissionDenied, path));
        }
        Ok(())
    }
}

/// Fold `.` and `..` components away. The tree holds no symlinks, so this
/// matches what a real filesystem would resolve.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !is_root(&normalized) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn insert_dirs(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
    for ancestor in path.ancestors().filter(|p| !is_root(p)) {
        nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
    }
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &Path) -> Result<FileKind, StorageError> {
        if is_root(path) {
            return Ok(FileKind::Dir);
        }
        match self.nodes.read().unwrap().get(path) {
            Some(Node::File(_)) => Ok(FileKind::File),
            Some(Node::Dir) => Ok(FileKind::Dir),
            Some(Node::Other) => Ok(FileKind::Other),
            None => Err(error(StorageErrorKind::NotFound, path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError> {
        match self.stat(path)? {
            FileKind::Dir => {}
            _ => return Err(error(StorageErrorKind::NotADirectory, path)),
        }
        Ok(self
            .nodes
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        match self.nodes.read().unwrap().get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(error(StorageErrorKind::IsADirectory, path)),
            Some(Node::Other) => Err(error(StorageErrorKind::InvalidData, path)),
            None => Err(error(StorageErrorKind::NotFound, path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        self.check_writable(path)?;
        let mut nodes = self.nodes.write().unwrap();

        if let Some(parent) = path.parent().filter(|p| !is_root(p)) {
            match nodes.get(parent) {
                Some(Node::Dir) => {}
                Some(_) => return Err(error(StorageErrorKind::NotADirectory, parent)),
                None => return Err(error(StorageErrorKind::NotFound, path)),
            }
        }
        if matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(error(StorageErrorKind::IsADirectory, path));
        }

        nodes.insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), StorageError> {
        self.check_writable(path)?;
        let mut nodes = self.nodes.write().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => Err(error(StorageErrorKind::IsADirectory, path)),
            Some(_) => {
                nodes.remove(path);
                Ok(())
            }
            None => Err(error(StorageErrorKind::NotFound, path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        self.check_writable(path)?;
        let mut nodes = self.nodes.write().unwrap();

        if let Some(blocker) = path
            .ancestors()
            .find(|p| matches!(nodes.get(*p), Some(Node::File(_) | Node::Other)))
        {
            return Err(error(StorageErrorKind::NotADirectory, blocker));
        }

        insert_dirs(&mut nodes, path);
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StorageError> {
        if path.is_relative() {
            return Err(error(StorageErrorKind::InvalidPath, path));
        }
        let resolved = normalize(path);
        self.stat(&resolved)?;
        Ok(resolved)
    }
}
