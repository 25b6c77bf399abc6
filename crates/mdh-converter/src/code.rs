//! Code extraction passes.
//!
//! Fenced blocks and inline code spans are rendered to their final HTML here,
//! with the body escaped on its own, and replaced by placeholder tokens so no
//! later pass can see their contents.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::options::QuotePolicy;
use crate::protect::ProtectedSpans;

/// Opening fence line (with optional language tag), body, closing fence line.
static FENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```([\w+#.-]*)[ \t]*\n((?s:.*?))^```[ \t]*$").unwrap()
});

static INLINE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Replace fenced code blocks with tokens for `<pre><code>` fragments.
///
/// The class attribute is omitted when the fence carries no language tag.
/// An unclosed fence is left as literal text.
pub(crate) fn extract_code_blocks(
    text: &str,
    spans: &mut ProtectedSpans,
    quotes: QuotePolicy,
) -> String {
    FENCE_PATTERN
        .replace_all(text, |caps: &Captures| {
            let lang = &caps[1];
            let body = escape_html(&caps[2], quotes);
            let fragment = if lang.is_empty() {
                format!("<pre><code>{body}</code></pre>")
            } else {
                format!(
                    r#"<pre><code class="language-{}">{body}</code></pre>"#,
                    escape_html(lang, quotes)
                )
            };
            spans.protect(fragment, body)
        })
        .into_owned()
}

/// Replace single-backtick spans with tokens for `<code>` fragments.
pub(crate) fn extract_inline_code(
    text: &str,
    spans: &mut ProtectedSpans,
    quotes: QuotePolicy,
) -> String {
    INLINE_CODE_PATTERN
        .replace_all(text, |caps: &Captures| {
            let body = escape_html(&caps[1], quotes);
            spans.protect(format!("<code>{body}</code>"), body)
        })
        .into_owned()
}
