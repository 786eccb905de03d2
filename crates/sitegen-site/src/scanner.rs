//! Source document discovery.
//!
//! Walks the content root and buckets every markdown document into a
//! [`DocumentGroup`] keyed by [`group_key`](crate::paths::group_key).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitegen_storage::{FileKind, FileSystem, StorageError, StorageErrorKind};

use crate::error::BuildError;
use crate::paths::{self, Grouping};

/// Documents sharing a group key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentGroup {
    /// Group key (`"."` for the content root, `"./<dir>"` otherwise).
    pub key: String,
    /// Directory a synthesized index for this group is written into.
    pub dir: PathBuf,
    /// Source documents in traversal order.
    pub documents: Vec<PathBuf>,
}

impl DocumentGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(key: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            dir: dir.into(),
            documents: Vec::new(),
        }
    }

    /// Check whether any document in the group is a landing document.
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.documents.iter().any(|d| paths::is_index(d))
    }
}

/// Discovers markdown documents under a content root.
///
/// Traversal is depth-first: a directory's documents come before its
/// subdirectories, and entries are visited in file-name order, so a fixed
/// tree always yields the same groups in the same order. Hidden entries
/// (leading `.`) are skipped and symlinks are not followed.
pub struct SourceScanner {
    fs: Arc<dyn FileSystem>,
    content_root: PathBuf,
    grouping: Grouping,
}

impl SourceScanner {
    /// Create a scanner over `content_root`.
    pub fn new(fs: Arc<dyn FileSystem>, content_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            content_root: content_root.into(),
            grouping: Grouping::default(),
        }
    }

    /// Set the grouping strategy.
    #[must_use]
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Fail unless the content root exists and is a directory.
    pub fn validate_root(&self) -> Result<(), BuildError> {
        let kind = self.fs.stat(&self.content_root).map_err(|source| BuildError::Scan {
            path: self.content_root.clone(),
            source,
        })?;

        if !kind.is_dir() {
            return Err(BuildError::Scan {
                path: self.content_root.clone(),
                source: StorageError::new(StorageErrorKind::NotADirectory)
                    .with_path(&self.content_root),
            });
        }
        Ok(())
    }

    /// Scan the content root and return groups in first-discovery order.
    pub fn scan(&self) -> Result<Vec<DocumentGroup>, BuildError> {
        self.validate_root()?;

        let mut groups = Vec::new();
        let mut positions = HashMap::new();
        self.scan_directory(&self.content_root, &mut groups, &mut positions)?;

        tracing::debug!(
            groups = groups.len(),
            documents = groups.iter().map(|g| g.documents.len()).sum::<usize>(),
            "Scanned content root"
        );
        Ok(groups)
    }

    fn scan_directory(
        &self,
        dir: &Path,
        groups: &mut Vec<DocumentGroup>,
        positions: &mut HashMap<String, usize>,
    ) -> Result<(), BuildError> {
        let scan_error = |path: &Path, source| BuildError::Scan {
            path: path.to_path_buf(),
            source,
        };

        let mut subdirs = Vec::new();

        for child in self.fs.read_dir(dir).map_err(|e| scan_error(dir, e))? {
            let hidden = child
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            if hidden {
                continue;
            }

            match self.fs.stat(&child).map_err(|e| scan_error(&child, e))? {
                FileKind::Dir => subdirs.push(child),
                FileKind::File if paths::is_markup(&child) => {
                    self.add_document(child, groups, positions);
                }
                FileKind::File | FileKind::Other => {}
            }
        }

        for subdir in subdirs {
            self.scan_directory(&subdir, groups, positions)?;
        }
        Ok(())
    }

    fn add_document(
        &self,
        document: PathBuf,
        groups: &mut Vec<DocumentGroup>,
        positions: &mut HashMap<String, usize>,
    ) {
        let key = paths::group_key(self.grouping, &self.content_root, &document);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            let dir = document
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            groups.push(DocumentGroup::new(key, dir));
            groups.len() - 1
        });

        tracing::debug!(
            document = %document.display(),
            group = %groups[position].key,
            "Discovered document"
        );
        groups[position].documents.push(document);
    }
}
