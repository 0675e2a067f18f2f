//! Console output for lint runs.

use crossterm::style::Stylize;

/// Styled line-oriented console writer.
///
/// Failure lines always print; banners and success lines are suppressed in
/// quiet mode. The failure line format
/// (`[Package: <id>; Language: <lang>]: <reason>`) is an observable
/// interface consumers parse in CI logs, so it comes through verbatim.
#[derive(Debug)]
pub struct Output {
    quiet: bool,
}

impl Output {
    /// Create a writer, optionally suppressing non-essential output.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a title banner with a dimmed rule.
    pub fn banner(&self, title: &str) {
        if self.quiet {
            return;
        }
        let rule = "━".repeat(45usize.saturating_sub(title.len() + 1));
        println!("{} {}", title.bold(), rule.dark_grey());
    }

    /// Print a success line (green check).
    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!("  {} {}", "✔".green(), msg);
    }

    /// Print a failure line (red cross). Never suppressed.
    pub fn failure(&self, msg: &str) {
        println!("  {} {}", "✗".red(), msg);
    }
}
