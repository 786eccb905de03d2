//! Document-to-site pipeline for sitegen.
//!
//! Turns a directory tree of markdown documents into a static HTML site:
//!
//! - [`SourceScanner`] discovers documents and buckets them into
//!   [`DocumentGroup`]s
//! - [`IndexSynthesizer`] gives every group a landing document
//! - [`PageRenderer`] converts one document into one [`RenderedPage`]
//! - [`OutputDir`] cleans, provisions and fills the destination directory
//! - [`SiteBuilder`] runs all of the above for a [`BuildConfig`]
//!
//! All I/O goes through [`sitegen_storage::FileSystem`], so the whole
//! pipeline runs against an in-memory filesystem in tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sitegen_site::{BuildConfig, SiteBuilder};
//! use sitegen_storage::OsFileSystem;
//!
//! let config = BuildConfig::new("content", "output", "My site");
//! let pages = SiteBuilder::new(Arc::new(OsFileSystem), config).build()?;
//! println!("{} pages", pages.len());
//! ```

mod builder;
mod error;
mod index;
mod output;
pub mod paths;
mod render;
mod scanner;
mod theme;

pub use builder::{BuildConfig, SiteBuilder};
pub use error::{BuildError, PathError};
pub use index::{IndexSynthesizer, ensure_root_group};
pub use output::{ASSETS_DIR, OutputDir};
pub use paths::Grouping;
pub use render::{PageRenderer, RenderedPage};
pub use scanner::{DocumentGroup, SourceScanner};
pub use theme::{BUILTIN_THEME_NAME, THEMES_DIR, Theme, ThemeAsset};
