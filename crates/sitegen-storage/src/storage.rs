//! Filesystem trait and error types.
//!
//! Provides the core [`FileSystem`] trait for abstracting disk access,
//! along with [`StorageError`] for unified error handling across backends.

use std::path::{Path, PathBuf};

/// Kind of filesystem entry reported by [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Anything else: symlinks (never followed), sockets, devices.
    Other,
}

impl FileKind {
    /// True for regular files.
    #[must_use]
    pub fn is_file(self) -> bool {
        self == Self::File
    }

    /// True for directories.
    #[must_use]
    pub fn is_dir(self) -> bool {
        self == Self::Dir
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Entry does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Entry already exists.
    AlreadyExists,
    /// Invalid path.
    InvalidPath,
    /// A directory was expected.
    NotADirectory,
    /// A file was expected but a directory was found.
    IsADirectory,
    /// Content is not valid for the requested operation.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path the error relates to, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend that produced the error, if known.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            std::io::ErrorKind::NotADirectory => StorageErrorKind::NotADirectory,
            std::io::ErrorKind::IsADirectory => StorageErrorKind::IsADirectory,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::AlreadyExists => "Already exists",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::NotADirectory => "Not a directory",
            StorageErrorKind::IsADirectory => "Is a directory",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Filesystem capability used by the site pipeline.
///
/// Paths are passed through unchanged; backends do not resolve them against
/// a root of their own.
pub trait FileSystem: Send + Sync {
    /// Report the kind of entry at `path` without following symlinks.
    fn stat(&self, path: &Path) -> Result<FileKind, StorageError>;

    /// List the direct children of a directory, sorted by file name.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError>;

    /// Read the full content of a regular file.
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Create or truncate a regular file. The parent directory must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError>;

    /// Remove a regular file.
    fn remove_file(&self, path: &Path) -> Result<(), StorageError>;

    /// Create a directory and any missing ancestors.
    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError>;

    /// Resolve an existing path to its absolute form, with `.`, `..` and
    /// symlinks resolved.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StorageError>;
}
