//! Landing document synthesis.

use std::path::PathBuf;
use std::sync::Arc;

use sitegen_storage::{FileSystem, StorageError, StorageErrorKind};

use crate::error::BuildError;
use crate::paths::{self, ROOT_GROUP_KEY};
use crate::scanner::DocumentGroup;

/// Ensures every group has a landing document.
///
/// A group without an `index.md` gets an empty placeholder written into its
/// directory. Existing files on disk are never overwritten, even empty ones
/// left by a previous run, so synthesis is idempotent. An `index.md` that is
/// not a regular file (a symlink, a directory) is never rendered by the
/// scanner and cannot be replaced, so it fails the build.
pub struct IndexSynthesizer {
    fs: Arc<dyn FileSystem>,
}

impl IndexSynthesizer {
    /// Create a synthesizer writing through `fs`.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Create missing placeholders and append them to their groups.
    ///
    /// Returns the paths of the placeholders written by this call.
    pub fn ensure_indexes(
        &self,
        groups: &mut [DocumentGroup],
    ) -> Result<Vec<PathBuf>, BuildError> {
        let mut created = Vec::new();

        for group in groups.iter_mut() {
            if group.has_index() {
                continue;
            }

            let index = paths::index_path(&group.dir);
            match self.fs.stat(&index) {
                Ok(kind) if kind.is_file() => {
                    tracing::debug!(path = %index.display(), "Index document already on disk");
                    continue;
                }
                Ok(_) => {
                    return Err(BuildError::Synthesis {
                        source: StorageError::new(StorageErrorKind::AlreadyExists)
                            .with_path(&index),
                        path: index,
                    });
                }
                Err(err) if err.kind() == StorageErrorKind::NotFound => {}
                Err(source) => return Err(BuildError::Synthesis { path: index, source }),
            }

            self.fs
                .write(&index, b"")
                .map_err(|source| BuildError::Synthesis {
                    path: index.clone(),
                    source,
                })?;
            tracing::debug!(
                path = %index.display(),
                group = %group.key,
                "Created placeholder index"
            );

            group.documents.push(index.clone());
            created.push(index);
        }

        Ok(created)
    }
}

/// Make sure the content root has a group, so `/index.html` is always built.
///
/// An empty root group is inserted first when no document sits directly
/// under the content root.
pub fn ensure_root_group(groups: &mut Vec<DocumentGroup>, content_root: impl Into<PathBuf>) {
    if !groups.iter().any(|g| g.key == ROOT_GROUP_KEY) {
        groups.insert(0, DocumentGroup::new(ROOT_GROUP_KEY, content_root));
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use sitegen_storage::MemoryFileSystem;

    use super::*;

    fn group(key: &str, dir: &str, documents: &[&str]) -> DocumentGroup {
        DocumentGroup {
            key: key.to_owned(),
            dir: PathBuf::from(dir),
            documents: documents.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn test_creates_missing_index() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/content/sub/b.md", "Body"));
        let mut groups = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];

        let created = IndexSynthesizer::new(fs.clone())
            .ensure_indexes(&mut groups)
            .unwrap();

        assert_eq!(created, vec![PathBuf::from("/content/sub/index.md")]);
        assert_eq!(
            groups[0].documents,
            vec![
                PathBuf::from("/content/sub/b.md"),
                PathBuf::from("/content/sub/index.md"),
            ]
        );
        assert_eq!(fs.file_string("/content/sub/index.md").unwrap(), "");
    }

    #[test]
    fn test_keeps_group_with_index() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/content/index.md", "# Home"));
        let mut groups = vec![group(".", "/content", &["/content/index.md"])];

        let created = IndexSynthesizer::new(fs.clone())
            .ensure_indexes(&mut groups)
            .unwrap();

        assert!(created.is_empty());
        assert_eq!(groups[0].documents.len(), 1);
        assert_eq!(fs.file_string("/content/index.md").unwrap(), "# Home");
    }

    #[test]
    fn test_never_overwrites_index_on_disk() {
        // Group built without the index, as a stale in-memory view would be.
        let fs = Arc::new(
            MemoryFileSystem::new()
                .with_file("/content/sub/b.md", "Body")
                .with_file("/content/sub/index.md", "Hand written"),
        );
        let mut groups = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];

        let created = IndexSynthesizer::new(fs.clone())
            .ensure_indexes(&mut groups)
            .unwrap();

        assert!(created.is_empty());
        assert_eq!(
            fs.file_string("/content/sub/index.md").unwrap(),
            "Hand written"
        );
    }

    #[test]
    fn test_second_run_is_noop() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/content/sub/b.md", "Body"));
        let synthesizer = IndexSynthesizer::new(fs.clone());

        let mut first = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];
        synthesizer.ensure_indexes(&mut first).unwrap();
        fs.write(Path::new("/content/sub/index.md"), b"# Edited")
            .unwrap();

        let mut second = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];
        let created = synthesizer.ensure_indexes(&mut second).unwrap();

        assert!(created.is_empty());
        assert_eq!(fs.file_string("/content/sub/index.md").unwrap(), "# Edited");
    }

    #[test]
    fn test_write_failure_is_synthesis_error() {
        let fs = Arc::new(
            MemoryFileSystem::new()
                .with_file("/content/sub/b.md", "Body")
                .with_write_failure("/content/sub"),
        );
        let mut groups = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];

        let err = IndexSynthesizer::new(fs)
            .ensure_indexes(&mut groups)
            .unwrap_err();

        match err {
            BuildError::Synthesis { path, source } => {
                assert_eq!(path, PathBuf::from("/content/sub/index.md"));
                assert_eq!(source.kind(), StorageErrorKind::PermissionDenied);
            }
            other => panic!("expected synthesis error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_regular_index_is_synthesis_error() {
        let fs = Arc::new(
            MemoryFileSystem::new()
                .with_file("/content/sub/b.md", "Body")
                .with_other("/content/sub/index.md"),
        );
        let mut groups = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];

        let err = IndexSynthesizer::new(fs.clone())
            .ensure_indexes(&mut groups)
            .unwrap_err();

        match err {
            BuildError::Synthesis { path, source } => {
                assert_eq!(path, PathBuf::from("/content/sub/index.md"));
                assert_eq!(source.kind(), StorageErrorKind::AlreadyExists);
            }
            other => panic!("expected synthesis error, got {other:?}"),
        }
        assert_eq!(groups[0].documents.len(), 1);
    }

    #[test]
    fn test_index_directory_is_synthesis_error() {
        let fs = Arc::new(MemoryFileSystem::new().with_dir("/content/index.md"));
        let mut groups = vec![group(".", "/content", &[])];

        let err = IndexSynthesizer::new(fs)
            .ensure_indexes(&mut groups)
            .unwrap_err();

        assert!(matches!(err, BuildError::Synthesis { .. }));
    }

    #[test]
    fn test_ensure_root_group_inserts_first() {
        let mut groups = vec![group("./sub", "/content/sub", &["/content/sub/b.md"])];

        ensure_root_group(&mut groups, "/content");

        assert_eq!(groups[0].key, ".");
        assert_eq!(groups[0].dir, PathBuf::from("/content"));
        assert!(groups[0].documents.is_empty());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_ensure_root_group_keeps_existing() {
        let mut groups = vec![group(".", "/content", &["/content/a.md"])];

        ensure_root_group(&mut groups, "/content");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].documents.len(), 1);
    }
}
