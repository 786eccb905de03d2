//! User-facing progress messages on stderr.
//!
//! Message text is built by plain functions so it can be checked without a
//! terminal; [`Output`] only picks the style and writes the line.

use std::fmt::Display;
use std::path::{MAIN_SEPARATOR, Path};

use console::{Style, Term};

/// Stderr reporter for build and preview events.
pub(crate) struct Output {
    term: Term,
    done: Style,
    notice: Style,
    failure: Style,
    address: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            notice: Style::new().yellow(),
            failure: Style::new().red(),
            address: Style::new().cyan().bold(),
        }
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Report a finished build.
    pub(crate) fn built(&self, pages: usize, output_dir: &Path) {
        self.line(&self.done, &build_summary(pages, output_dir));
    }

    /// Report the preview address and how to stop the server.
    pub(crate) fn serving(&self, url: &str) {
        self.line(&self.address, &format!("Serving at {url}"));
        let _ = self.term.write_line("Press Ctrl+C to stop.");
    }

    /// Report that the browser could not be launched. Serving continues.
    pub(crate) fn browser_unavailable(&self, err: &dyn Display) {
        self.line(&self.notice, &format!("Could not open browser: {err}"));
    }

    /// Report a clean server shutdown.
    pub(crate) fn stopped(&self) {
        let _ = self.term.write_line("Server closed. Exiting...");
    }

    /// Report the error that ends the run.
    pub(crate) fn failed(&self, err: &dyn Display) {
        self.line(&self.failure, &format!("Error: {err}"));
    }
}

/// Page count and output directory, the directory shown with a trailing
/// separator.
pub(crate) fn build_summary(pages: usize, output_dir: &Path) -> String {
    let mut dir = output_dir.display().to_string();
    if !dir.ends_with(MAIN_SEPARATOR) {
        dir.push(MAIN_SEPARATOR);
    }
    format!("{pages} HTML files created in directory: {dir}")
}
