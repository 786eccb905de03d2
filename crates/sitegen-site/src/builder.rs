//! Site build orchestration.
//!
//! [`SiteBuilder::build`] runs the whole pipeline for one [`BuildConfig`]:
//!
//! 1. Validate the content root (nothing is touched if it is missing) and
//!    refuse an output directory that resolves to it or to one of its
//!    ancestors
//! 2. Load the theme, then clean or create the output directory and
//!    provision `themes/` and `assets/`
//! 3. Scan documents into groups and synthesize missing index documents
//! 4. Map every document to its output page, rejecting collisions
//! 5. Render every page, then write them all
//!
//! A failure aborts the build. Pages already written stay on disk; a rebuild
//! regenerates them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitegen_renderer::{CmarkConverter, MarkdownConverter};
use sitegen_storage::FileSystem;

use crate::error::BuildError;
use crate::index::{IndexSynthesizer, ensure_root_group};
use crate::output::OutputDir;
use crate::paths::{self, Grouping};
use crate::render::{PageRenderer, RenderedPage};
use crate::scanner::{DocumentGroup, SourceScanner};
use crate::theme::Theme;

/// Immutable inputs of one build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory tree holding source documents.
    pub content_root: PathBuf,
    /// Destination directory.
    pub output_dir: PathBuf,
    /// Stylesheet linked from every page.
    pub theme: Theme,
    /// Site name shown in titles and the navigation header.
    pub site_name: String,
    /// Group key strategy.
    pub grouping: Grouping,
}

impl BuildConfig {
    /// Create a config with the built-in theme and path grouping.
    pub fn new(
        content_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            content_root: content_root.into(),
            output_dir: output_dir.into(),
            theme: Theme::default(),
            site_name: site_name.into(),
            grouping: Grouping::default(),
        }
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the grouping strategy.
    #[must_use]
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }
}

/// Builds a static site from a content tree.
pub struct SiteBuilder {
    fs: Arc<dyn FileSystem>,
    converter: Arc<dyn MarkdownConverter>,
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a builder using the pulldown-cmark converter.
    pub fn new(fs: Arc<dyn FileSystem>, config: BuildConfig) -> Self {
        Self {
            fs,
            converter: Arc::new(CmarkConverter::new()),
            config,
        }
    }

    /// Replace the markdown converter.
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn MarkdownConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Build configuration.
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the full build and return every page written.
    pub fn build(&self) -> Result<Vec<RenderedPage>, BuildError> {
        let config = &self.config;
        tracing::info!(
            content = %config.content_root.display(),
            output = %config.output_dir.display(),
            "Building site"
        );

        let scanner = SourceScanner::new(Arc::clone(&self.fs), &config.content_root)
            .with_grouping(config.grouping);
        scanner.validate_root()?;

        let output = OutputDir::new(Arc::clone(&self.fs), &config.output_dir);
        if output.contains(&config.content_root)? {
            return Err(BuildError::OutputContainsContent {
                output: config.output_dir.clone(),
                content: config.content_root.clone(),
            });
        }

        let theme = config.theme.load(self.fs.as_ref())?;
        output.prepare()?;
        output.provision(&theme)?;

        let mut groups = scanner.scan()?;
        ensure_root_group(&mut groups, &config.content_root);
        let created = IndexSynthesizer::new(Arc::clone(&self.fs)).ensure_indexes(&mut groups)?;
        tracing::info!(
            groups = groups.len(),
            placeholders = created.len(),
            "Scanned content"
        );

        let targets = self.map_outputs(&groups)?;

        let renderer = PageRenderer::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.converter),
            &config.site_name,
            &theme.href(),
        );
        let pages = targets
            .into_iter()
            .map(|(source, destination)| renderer.render(&source, destination))
            .collect::<Result<Vec<_>, _>>()?;

        for page in &pages {
            output.write_page(page)?;
        }

        tracing::info!(
            pages = pages.len(),
            output = %config.output_dir.display(),
            "Site built"
        );
        Ok(pages)
    }

    /// Pair every document with its output path, in group order.
    fn map_outputs(&self, groups: &[DocumentGroup]) -> Result<Vec<(PathBuf, PathBuf)>, BuildError> {
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        let mut targets = Vec::new();

        for document in groups.iter().flat_map(|g| &g.documents) {
            let destination = paths::output_path(
                &self.config.output_dir,
                &self.config.content_root,
                document,
            )?;
            if let Some(first) = claimed.insert(destination.clone(), document) {
                return Err(BuildError::OutputCollision {
                    first: first.to_path_buf(),
                    second: document.clone(),
                    output: destination,
                });
            }
            targets.push((document.clone(), destination));
        }

        Ok(targets)
    }
}
