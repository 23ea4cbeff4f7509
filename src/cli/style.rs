//! Terminal styling helpers

use owo_colors::{OwoColorize, Stream};

/// Styling shortcuts for CLI output
pub trait Stylize {
    /// Dimmed secondary text
    fn muted(&self) -> String;
    /// Highlighted value
    fn emphasis(&self) -> String;
    /// Failure text
    fn error(&self) -> String;
}

impl<T: AsRef<str>> Stylize for T {
    fn muted(&self) -> String {
        self.as_ref()
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string()
    }

    fn emphasis(&self) -> String {
        self.as_ref()
            .if_supports_color(Stream::Stdout, |s| s.bold())
            .to_string()
    }

    fn error(&self) -> String {
        self.as_ref()
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".if_supports_color(Stream::Stdout, |s| s.green()).to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".if_supports_color(Stream::Stdout, |s| s.red()).to_string()
}
