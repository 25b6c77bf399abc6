//! HTML entity escaping.

use crate::options::QuotePolicy;

/// Escape HTML special characters in text.
///
/// `&`, `<`, `>` and `"` are always escaped. `'` is escaped to `&#039;` only
/// under [`QuotePolicy::Escape`]. Markdown punctuation has no HTML meaning and
/// passes through untouched.
///
/// # Examples
///
/// ```
/// use mdh_converter::{QuotePolicy, escape_html};
///
/// assert_eq!(escape_html("<b>\"hi\"</b>", QuotePolicy::Keep), "&lt;b&gt;&quot;hi&quot;&lt;/b&gt;");
/// assert_eq!(escape_html("it's", QuotePolicy::Escape), "it&#039;s");
/// assert_eq!(escape_html("**a** _b_ #c", QuotePolicy::Keep), "**a** _b_ #c");
/// ```
pub fn escape_html(s: &str, quotes: QuotePolicy) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' if quotes == QuotePolicy::Escape => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}
