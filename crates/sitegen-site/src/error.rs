//! Build error types.

use std::path::PathBuf;

use sitegen_storage::StorageError;

/// Error raised when a path cannot be mapped into the output tree.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// The document does not live under the content root.
    #[error("{} is not inside content root {}", path.display(), root.display())]
    OutsideRoot {
        /// Offending document path.
        path: PathBuf,
        /// Content root it was expected under.
        root: PathBuf,
    },
}

/// Build pipeline error.
///
/// Every variant is fatal for the whole build and names the offending path.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Content root missing, not a directory, or unreadable during traversal.
    #[error("Cannot scan {}: {source}", path.display())]
    Scan {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Placeholder index document could not be created.
    #[error("Cannot create index document {}: {source}", path.display())]
    Synthesis {
        /// Placeholder path.
        path: PathBuf,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Source document could not be read or decoded.
    #[error("Cannot render {}: {source}", path.display())]
    Render {
        /// Source document path.
        path: PathBuf,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Output directory, theme or page could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        /// Path being written (or the theme being copied).
        path: PathBuf,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Two source documents map to the same output page.
    #[error(
        "{} and {} both map to {}",
        first.display(),
        second.display(),
        output.display()
    )]
    OutputCollision {
        /// Source that claimed the output path first.
        first: PathBuf,
        /// Source that collided with it.
        second: PathBuf,
        /// Shared output path.
        output: PathBuf,
    },

    /// Output directory would contain the content root, so cleaning it would
    /// delete the sources.
    #[error(
        "Output directory {} contains content root {}",
        output.display(),
        content.display()
    )]
    OutputContainsContent {
        /// Output directory.
        output: PathBuf,
        /// Content root.
        content: PathBuf,
    },

    /// Path mapping failed.
    #[error(transparent)]
    Path(#[from] PathError),
}
