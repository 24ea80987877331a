//! Field data utilities for ZPL labels
//!
//! ZPL treats `^` and `~` as command prefixes anywhere in the stream, so
//! field data coming from spreadsheets has to be neutralized before it is
//! placed between `^FD` and `^FS`. With `^FH` active the default hex
//! indicator is `_`, which is then itself escaped.

use std::borrow::Cow;

/// Hex indicator used together with `^FH`
pub const HEX_INDICATOR: char = '_';

/// Check whether field data needs `^FH` hex escaping
pub fn needs_escape(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '^' | '~' | HEX_INDICATOR))
}

/// Escape field data for use after `^FH^FD`
///
/// `^`, `~` and `_` become `_5E`, `_7E` and `_5F`. Line breaks and other
/// control characters collapse to a single space.
pub fn escape_field(s: &str) -> Cow<'_, str> {
    if !needs_escape(s) && !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    let mut last_was_space = false;
    for c in s.chars() {
        match c {
            '^' => out.push_str("_5E"),
            '~' => out.push_str("_7E"),
            HEX_INDICATOR => out.push_str("_5F"),
            c if c.is_control() => {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
                continue;
            }
            c => out.push(c),
        }
        last_was_space = c == ' ';
    }
    Cow::Owned(out)
}
