//! Markdown conversion and HTML page shell for sitegen.
//!
//! This crate provides the pieces that turn one markdown document into one
//! complete HTML page:
//!
//! - [`MarkdownConverter`]: the opaque text-in, fragment-out conversion seam,
//!   with [`CmarkConverter`] as the pulldown-cmark implementation
//! - [`navigation_header`]: the site-wide markdown link prepended to every page
//! - [`PageShell`]: the minimal HTML document wrapped around each fragment
//!
//! # Example
//!
//! ```
//! use sitegen_renderer::{CmarkConverter, MarkdownConverter, PageShell, navigation_header};
//!
//! let markdown = format!("{}# Hello", navigation_header("Demo"));
//! let body = CmarkConverter::new().convert(&markdown);
//! let html = PageShell::new("Demo", "/themes/light_theme.css").wrap(&body);
//! assert!(html.contains(r#"<a href="/index.html">Demo</a>"#));
//! ```

mod converter;
mod page;
mod util;

pub use converter::{CmarkConverter, MarkdownConverter};
pub use page::{HOME_HREF, PageShell, navigation_header};
pub use util::{escape_html, escape_markdown};
