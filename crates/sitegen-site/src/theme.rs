//! Theme stylesheet selection.

use std::path::PathBuf;

use sitegen_storage::{FileSystem, StorageError, StorageErrorKind};

use crate::error::BuildError;

/// File name of the embedded stylesheet.
pub const BUILTIN_THEME_NAME: &str = "light_theme.css";

const BUILTIN_THEME_CSS: &str = include_str!("../themes/light_theme.css");

/// Output subdirectory holding the stylesheet.
pub const THEMES_DIR: &str = "themes";

/// Stylesheet linked from every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    /// Embedded light stylesheet.
    #[default]
    Builtin,
    /// Stylesheet file copied from disk.
    File(PathBuf),
}

/// Stylesheet contents ready to be written into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAsset {
    /// File name under `themes/`.
    pub file_name: String,
    /// Raw stylesheet bytes.
    pub contents: Vec<u8>,
}

impl ThemeAsset {
    /// Root-absolute link target, valid from pages at any depth.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/{THEMES_DIR}/{}", self.file_name)
    }
}

impl Theme {
    /// Load the stylesheet.
    ///
    /// A missing or unreadable theme file is a write failure: the stylesheet
    /// cannot be copied into the output tree.
    pub fn load(&self, fs: &dyn FileSystem) -> Result<ThemeAsset, BuildError> {
        match self {
            Self::Builtin => Ok(ThemeAsset {
                file_name: BUILTIN_THEME_NAME.to_owned(),
                contents: BUILTIN_THEME_CSS.as_bytes().to_vec(),
            }),
            Self::File(path) => {
                let write_error = |source| BuildError::Write {
                    path: path.clone(),
                    source,
                };
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        write_error(
                            StorageError::new(StorageErrorKind::InvalidPath).with_path(path),
                        )
                    })?;
                let contents = fs.read(path).map_err(write_error)?;
                Ok(ThemeAsset {
                    file_name,
                    contents,
                })
            }
        }
    }
}
