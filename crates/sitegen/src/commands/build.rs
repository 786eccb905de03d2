//! Site build step.

use std::path::PathBuf;
use std::sync::Arc;

use sitegen_config::{Config, GroupingMode};
use sitegen_site::{BuildConfig, Grouping, SiteBuilder, Theme};
use sitegen_storage::OsFileSystem;

use crate::error::CliError;
use crate::output::Output;

/// Turn loaded configuration into an absolute-path build configuration.
pub(crate) fn build_config(config: &Config) -> Result<BuildConfig, CliError> {
    let resolved = &config.build_resolved;
    let content_dir = resolved.content_dir.as_deref().ok_or_else(|| {
        CliError::Validation(
            "No content directory given (pass CONTENT_DIR or set build.content_dir)".to_owned(),
        )
    })?;

    let theme = match &resolved.theme {
        Some(path) => Theme::File(std::path::absolute(path)?),
        None => Theme::Builtin,
    };
    let grouping = match resolved.grouping {
        GroupingMode::Path => Grouping::Path,
        GroupingMode::Basename => Grouping::Basename,
    };

    Ok(BuildConfig::new(
        std::path::absolute(content_dir)?,
        std::path::absolute(&resolved.output_dir)?,
        config.site.name.clone(),
    )
    .with_theme(theme)
    .with_grouping(grouping))
}

/// Build the site and report the page count.
///
/// Returns the output directory.
pub(crate) fn run(config: &Config, output: &Output) -> Result<PathBuf, CliError> {
    let build_config = build_config(config)?;
    let builder = SiteBuilder::new(Arc::new(OsFileSystem), build_config);
    let pages = builder.build()?;

    let output_dir = builder.config().output_dir.clone();
    output.built(pages.len(), &output_dir);
    Ok(output_dir)
}
