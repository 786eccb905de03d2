//! Per-document page rendering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitegen_renderer::{MarkdownConverter, PageShell, navigation_header};
use sitegen_storage::{FileSystem, StorageError, StorageErrorKind};

use crate::error::BuildError;

/// A complete HTML page ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Source document.
    pub source: PathBuf,
    /// Destination page path.
    pub output_path: PathBuf,
    /// Full HTML document.
    pub html: String,
}

/// Turns one source document into one HTML page.
///
/// Every page gets the same navigation header prepended to its markdown
/// before conversion and the same shell around the converted fragment.
pub struct PageRenderer {
    fs: Arc<dyn FileSystem>,
    converter: Arc<dyn MarkdownConverter>,
    shell: PageShell,
    header: String,
}

impl PageRenderer {
    /// Create a renderer for a site called `site_name`.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        converter: Arc<dyn MarkdownConverter>,
        site_name: &str,
        stylesheet_href: &str,
    ) -> Self {
        Self {
            fs,
            converter,
            shell: PageShell::new(site_name, stylesheet_href),
            header: navigation_header(site_name),
        }
    }

    /// Render `source` into a page destined for `output_path`.
    ///
    /// Source bytes must be valid UTF-8.
    pub fn render(&self, source: &Path, output_path: PathBuf) -> Result<RenderedPage, BuildError> {
        let render_error = |err| BuildError::Render {
            path: source.to_path_buf(),
            source: err,
        };

        let bytes = self.fs.read(source).map_err(render_error)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            render_error(
                StorageError::new(StorageErrorKind::InvalidData)
                    .with_path(source)
                    .with_source(e),
            )
        })?;

        let mut markdown = String::with_capacity(self.header.len() + text.len());
        markdown.push_str(&self.header);
        markdown.push_str(&text);

        let html = self.shell.wrap(&self.converter.convert(&markdown));

        tracing::debug!(
            source = %source.display(),
            output = %output_path.display(),
            "Rendered page"
        );
        Ok(RenderedPage {
            source: source.to_path_buf(),
            output_path,
            html,
        })
    }
}
