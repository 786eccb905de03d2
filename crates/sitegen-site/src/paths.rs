//! Pure mapping from source paths to output paths and group keys.

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// File extension of source documents.
pub const MARKUP_EXTENSION: &str = "md";
/// File extension of rendered pages.
pub const OUTPUT_EXTENSION: &str = "html";
/// File stem of a directory's landing document.
pub const INDEX_STEM: &str = "index";
/// Group key of documents directly under the content root.
pub const ROOT_GROUP_KEY: &str = ".";

/// How documents are bucketed into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    /// Key by the parent directory's path relative to the content root.
    ///
    /// Distinct directories never share a group.
    #[default]
    Path,
    /// Key by the parent directory's base name only.
    ///
    /// Sibling trees such as `a/notes/` and `b/notes/` collapse into one
    /// group, and only the first-discovered directory receives a synthesized
    /// index.
    Basename,
}

/// Compute the group key of `file_path`.
///
/// Returns [`ROOT_GROUP_KEY`] when the file sits directly under
/// `content_root`, otherwise `"./"` followed by either the relative parent
/// path (`/`-separated) or its base name, depending on `grouping`.
pub fn group_key(grouping: Grouping, content_root: &Path, file_path: &Path) -> String {
    let parent = file_path.parent().unwrap_or(Path::new(""));
    if parent == content_root {
        return ROOT_GROUP_KEY.to_owned();
    }

    let name = match (grouping, parent.strip_prefix(content_root)) {
        (Grouping::Path, Ok(relative)) => join_components(relative),
        _ => parent
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    format!("./{name}")
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compute the output page path of `file_path`.
///
/// The path relative to `content_root` is kept, its extension replaced by
/// [`OUTPUT_EXTENSION`], and the result joined under `output_dir`.
pub fn output_path(
    output_dir: &Path,
    content_root: &Path,
    file_path: &Path,
) -> Result<PathBuf, PathError> {
    let relative = file_path
        .strip_prefix(content_root)
        .map_err(|_| PathError::OutsideRoot {
            path: file_path.to_path_buf(),
            root: content_root.to_path_buf(),
        })?;

    Ok(output_dir.join(relative.with_extension(OUTPUT_EXTENSION)))
}

/// Check whether `path` names a markup document.
pub fn is_markup(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MARKUP_EXTENSION)
}

/// Check whether `path` names a directory's landing document.
pub fn is_index(path: &Path) -> bool {
    is_markup(path) && path.file_stem().is_some_and(|s| s == INDEX_STEM)
}

/// Landing document path inside `dir`.
pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(format!("{INDEX_STEM}.{MARKUP_EXTENSION}"))
}
