//! Input normalization.

use crate::protect::{TOKEN_CLOSE, TOKEN_OPEN};

const BOM: char = '\u{FEFF}';

/// Prepare raw input for the pipeline.
///
/// Drops a leading byte-order mark, folds `\r\n` and lone `\r` into `\n`, and
/// replaces placeholder sentinels with U+FFFD so input cannot forge a token.
pub(crate) fn normalize(text: &str) -> String {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            TOKEN_OPEN | TOKEN_CLOSE => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(c),
        }
    }
    out
}
