//! Output directory lifecycle.
//!
//! An existing output directory is cleaned by deleting every regular file
//! beneath it; directories and non-regular entries stay. A missing one is
//! created. [`OutputDir::contains`] compares resolved paths, so a `..` or
//! symlinked output path cannot hide an ancestor of the content root. The theme and the reserved `assets/` directory are provisioned
//! before any page is written.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use sitegen_storage::{FileKind, FileSystem, StorageError, StorageErrorKind};

use crate::error::BuildError;
use crate::render::RenderedPage;
use crate::theme::{THEMES_DIR, ThemeAsset};

/// Output subdirectory reserved for author assets.
pub const ASSETS_DIR: &str = "assets";

fn write_error(path: &Path, source: StorageError) -> BuildError {
    BuildError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Destination directory of a build.
pub struct OutputDir {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl OutputDir {
    /// Wrap `path` as an output directory.
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Output directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the existing directory `dir` is the output directory or
    /// lies beneath it, once `.`, `..` and symlinks are resolved on both
    /// sides.
    pub fn contains(&self, dir: &Path) -> Result<bool, BuildError> {
        let dir = self.fs.canonicalize(dir).map_err(|e| BuildError::Scan {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let output = self
            .resolved_path()
            .map_err(|e| write_error(&self.path, e))?;

        tracing::debug!(
            dir = %dir.display(),
            output = %output.display(),
            "Resolved paths"
        );
        Ok(dir.starts_with(&output))
    }

    /// Resolve the output path through its nearest existing ancestor. The
    /// directory itself may not exist yet.
    fn resolved_path(&self) -> Result<PathBuf, StorageError> {
        let mut not_found = None;
        for ancestor in self.path.ancestors() {
            match self.fs.canonicalize(ancestor) {
                Ok(mut resolved) => {
                    let rest = self.path.strip_prefix(ancestor).unwrap_or(Path::new(""));
                    for component in rest.components() {
                        match component {
                            Component::ParentDir => {
                                resolved.pop();
                            }
                            Component::Normal(name) => resolved.push(name),
                            _ => {}
                        }
                    }
                    return Ok(resolved);
                }
                Err(err) if err.kind() == StorageErrorKind::NotFound => not_found = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(not_found.unwrap_or_else(|| StorageError::not_found(&self.path)))
    }

    /// Clean the directory if it exists, create it otherwise.
    ///
    /// Returns the number of files removed.
    pub fn prepare(&self) -> Result<usize, BuildError> {
        match self.fs.stat(&self.path) {
            Ok(FileKind::Dir) => {
                let removed = self.purge(&self.path)?;
                tracing::info!(
                    path = %self.path.display(),
                    removed,
                    "Cleaned output directory"
                );
                Ok(removed)
            }
            Ok(_) => Err(write_error(
                &self.path,
                StorageError::new(StorageErrorKind::NotADirectory).with_path(&self.path),
            )),
            Err(err) if err.kind() == StorageErrorKind::NotFound => {
                self.fs
                    .create_dir_all(&self.path)
                    .map_err(|e| write_error(&self.path, e))?;
                tracing::info!(path = %self.path.display(), "Created output directory");
                Ok(0)
            }
            Err(err) => Err(write_error(&self.path, err)),
        }
    }

    fn purge(&self, dir: &Path) -> Result<usize, BuildError> {
        let mut removed = 0;
        for child in self.fs.read_dir(dir).map_err(|e| write_error(dir, e))? {
            match self.fs.stat(&child).map_err(|e| write_error(&child, e))? {
                FileKind::File => {
                    self.fs
                        .remove_file(&child)
                        .map_err(|e| write_error(&child, e))?;
                    tracing::debug!(path = %child.display(), "Removed stale file");
                    removed += 1;
                }
                FileKind::Dir => removed += self.purge(&child)?,
                FileKind::Other => {}
            }
        }
        Ok(removed)
    }

    /// Create `themes/` and `assets/`, and write the stylesheet.
    ///
    /// Returns the path the stylesheet was written to.
    pub fn provision(&self, theme: &ThemeAsset) -> Result<PathBuf, BuildError> {
        let themes_dir = self.path.join(THEMES_DIR);
        let assets_dir = self.path.join(ASSETS_DIR);

        for dir in [&themes_dir, &assets_dir] {
            self.fs
                .create_dir_all(dir)
                .map_err(|e| write_error(dir, e))?;
        }

        let theme_path = themes_dir.join(&theme.file_name);
        self.fs
            .write(&theme_path, &theme.contents)
            .map_err(|e| write_error(&theme_path, e))?;

        tracing::debug!(path = %theme_path.display(), "Copied theme");
        Ok(theme_path)
    }

    /// Write one page, creating missing parent directories.
    pub fn write_page(&self, page: &RenderedPage) -> Result<(), BuildError> {
        if let Some(parent) = page.output_path.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| write_error(parent, e))?;
        }
        self.fs
            .write(&page.output_path, page.html.as_bytes())
            .map_err(|e| write_error(&page.output_path, e))?;

        tracing::debug!(path = %page.output_path.display(), "Wrote page");
        Ok(())
    }
}
