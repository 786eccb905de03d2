//! Markdown-to-HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Converts a markdown document into an HTML fragment.
///
/// Implementations are total: every UTF-8 input produces a fragment.
pub trait MarkdownConverter: Send + Sync {
    /// Convert markdown text to an HTML fragment.
    fn convert(&self, markdown: &str) -> String;
}

/// [`MarkdownConverter`] backed by pulldown-cmark.
#[derive(Debug, Clone, Copy)]
pub struct CmarkConverter {
    gfm: bool,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl CmarkConverter {
    /// Create a converter with GitHub Flavored Markdown extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Footnotes
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }
}

impl MarkdownConverter for CmarkConverter {
    fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(CmarkConverter::new().convert("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(CmarkConverter::new().convert("Body"), "<p>Body</p>\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(CmarkConverter::new().convert(""), "");
    }

    #[test]
    fn test_emphasis_and_links() {
        let html = CmarkConverter::new().convert("*a* and [b](/b.html)");

        assert_eq!(
            html,
            "<p><em>a</em> and <a href=\"/b.html\">b</a></p>\n"
        );
    }

    #[test]
    fn test_list() {
        let html = CmarkConverter::new().convert("- one\n- two");

        assert_eq!(html, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
    }

    #[test]
    fn test_strikethrough_requires_gfm() {
        let gfm = CmarkConverter::new().convert("~~gone~~");
        let plain = CmarkConverter::new().with_gfm(false).convert("~~gone~~");

        assert!(gfm.contains("<del>gone</del>"));
        assert!(!plain.contains("<del>"));
    }

    #[test]
    fn test_converter_is_object_safe() {
        let converter: Box<dyn MarkdownConverter> = Box::new(CmarkConverter::new());
        assert_eq!(converter.convert("x"), "<p>x</p>\n");
    }
}
