//! Local filesystem implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{FileKind, FileSystem, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Os";

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

fn io_error(err: std::io::Error, path: &Path) -> StorageError {
    StorageError::io(err, path).with_backend(BACKEND)
}

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &Path) -> Result<FileKind, StorageError> {
        let file_type = fs::symlink_metadata(path)
            .map_err(|e| io_error(e, path))?
            .file_type();

        Ok(if file_type.is_file() {
            FileKind::File
        } else if file_type.is_dir() {
            FileKind::Dir
        } else {
            FileKind::Other
        })
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, StorageError> {
        let mut children = fs::read_dir(path)
            .map_err(|e| io_error(e, path))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io_error(e, path))?;

        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        fs::read(path).map_err(|e| io_error(e, path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        fs::write(path, contents).map_err(|e| io_error(e, path))
    }

    fn remove_file(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path).map_err(|e| io_error(e, path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| io_error(e, path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, StorageError> {
        fs::canonicalize(path).map_err(|e| io_error(e, path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::StorageErrorKind;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_os_file_system_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OsFileSystem>();
    }

    #[test]
    fn test_stat_reports_files_and_dirs() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        assert_eq!(
            OsFileSystem.stat(&temp_dir.path().join("a.md")).unwrap(),
            FileKind::File
        );
        assert_eq!(
            OsFileSystem.stat(&temp_dir.path().join("sub")).unwrap(),
            FileKind::Dir
        );
    }

    #[test]
    fn test_stat_missing_is_not_found() {
        let temp_dir = create_test_dir();

        let err = OsFileSystem
            .stat(&temp_dir.path().join("missing"))
            .unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Os"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_does_not_follow_symlinks() {
        let temp_dir = create_test_dir();
        let target = temp_dir.path().join("target.md");
        let link = temp_dir.path().join("link.md");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(OsFileSystem.stat(&link).unwrap(), FileKind::Other);
    }

    #[test]
    fn test_read_dir_is_sorted() {
        let temp_dir = create_test_dir();
        for name in ["c.md", "a.md", "b"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let children = OsFileSystem.read_dir(temp_dir.path()).unwrap();
        let names: Vec<_> = children
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.md", "b", "c.md"]);
    }

    #[test]
    fn test_write_read_remove() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("page.html");

        OsFileSystem.write(&path, b"<p>hi</p>").unwrap();
        assert_eq!(OsFileSystem.read(&path).unwrap(), b"<p>hi</p>");

        OsFileSystem.remove_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_write_without_parent_fails() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("missing/page.html");

        let err = OsFileSystem.write(&path, b"x").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_create_dir_all_nested() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("a/b/c");

        OsFileSystem.create_dir_all(&path).unwrap();
        OsFileSystem.create_dir_all(&path).unwrap();

        assert!(path.is_dir());
    }

    #[test]
    fn test_canonicalize_resolves_parent_components() {
        let temp_dir = create_test_dir();
        let content = temp_dir.path().join("site/content");
        fs::create_dir_all(&content).unwrap();

        let resolved = OsFileSystem.canonicalize(&content.join("..")).unwrap();

        assert_eq!(
            resolved,
            fs::canonicalize(temp_dir.path().join("site")).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_follows_symlinks() {
        let temp_dir = create_test_dir();
        let site = temp_dir.path().join("site");
        let link = temp_dir.path().join("public");
        fs::create_dir(&site).unwrap();
        std::os::unix::fs::symlink(&site, &link).unwrap();

        assert_eq!(
            OsFileSystem.canonicalize(&link).unwrap(),
            OsFileSystem.canonicalize(&site).unwrap()
        );
    }

    #[test]
    fn test_canonicalize_missing_is_not_found() {
        let temp_dir = create_test_dir();

        let err = OsFileSystem
            .canonicalize(&temp_dir.path().join("missing"))
            .unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
    }
}
