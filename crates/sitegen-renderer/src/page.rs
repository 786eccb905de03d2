//! Navigation header and HTML document shell.

use std::fmt::Write;

use crate::util::{escape_html, escape_markdown};

/// Root-absolute link target of the navigation header.
pub const HOME_HREF: &str = "/index.html";

/// Markdown prepended to every page: a top-level heading linking home.
///
/// The link is root-absolute so it resolves at any nesting depth when the
/// site is served from its root.
pub fn navigation_header(site_name: &str) -> String {
    format!("# [{}]({HOME_HREF})\n\n", escape_markdown(site_name))
}

/// Minimal HTML document wrapped around each rendered fragment.
#[derive(Debug, Clone)]
pub struct PageShell {
    site_name: String,
    stylesheet_href: String,
}

impl PageShell {
    /// Create a shell titled `site_name` that links `stylesheet_href`.
    #[must_use]
    pub fn new(site_name: impl Into<String>, stylesheet_href: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            stylesheet_href: stylesheet_href.into(),
        }
    }

    /// Wrap an HTML body fragment into a complete document.
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 256);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("    <meta charset=\"UTF-8\">\n");
        writeln!(out, "    <title>{}</title>", escape_html(&self.site_name)).unwrap();
        writeln!(
            out,
            "    <link rel=\"stylesheet\" href=\"{}\">",
            escape_html(&self.stylesheet_href)
        )
        .unwrap();
        out.push_str("</head>\n<body>\n");
        out.push_str(body);
        if !body.is_empty() && !body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}
