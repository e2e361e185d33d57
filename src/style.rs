//! Text decoration for terminal output.
//!
//! Each helper is a pure function of its input. Styling is only applied when
//! stdout supports it, so piped output and `NO_COLOR` stay plain.

use owo_colors::{OwoColorize, Stream};

#[must_use]
pub fn bold(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |s| s.bold()).to_string()
}

#[must_use]
pub fn green(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |s| s.green()).to_string()
}

#[must_use]
pub fn cyan(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
}

#[must_use]
pub fn dim(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string()
}

/// Removes SGR escape sequences, leaving the plain text.
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}
