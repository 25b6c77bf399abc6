//! Paragraph wrapping.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::BlockWrap;
use crate::protect::ProtectedSpans;

/// One or more blank (or whitespace-only) lines.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(?:h[1-6]|ul|ol|pre|blockquote|hr)\b").unwrap());

/// Split on blank lines, drop empty blocks, wrap the rest in `<p>`.
///
/// Under [`BlockWrap::Bare`] a block that already starts with a block-level
/// tag is left alone. A block starting with a placeholder token is judged by
/// the fragment behind the token, so a fenced code block counts as `<pre>`.
pub(crate) fn paragraphs(text: &str, spans: &ProtectedSpans, wrap: BlockWrap) -> String {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if wrap == BlockWrap::Bare && starts_with_block_tag(block, spans) {
                block.to_owned()
            } else {
                format!("<p>{block}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn starts_with_block_tag(block: &str, spans: &ProtectedSpans) -> bool {
    let head = spans.leading_fragment(block).unwrap_or(block);
    BLOCK_TAG.is_match(head)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bare(text: &str) -> String {
        paragraphs(text, &ProtectedSpans::new(), BlockWrap::Bare)
    }

    #[test]
    fn test_two_paragraphs() {
        assert_eq!(
            bare("First paragraph\n\nSecond paragraph"),
            "<p>First paragraph</p>\n<p>Second paragraph</p>"
        );
    }

    #[test]
    fn test_many_blank_lines_collapse() {
        assert_eq!(bare("a\n\n\n\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        assert_eq!(bare("a\n  \t\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_single_newline_stays_in_paragraph() {
        assert_eq!(bare("a\nb"), "<p>a\nb</p>");
    }

    #[test]
    fn test_block_tags_left_bare() {
        for block in [
            "<h1>T</h1>",
            "<h6>T</h6>",
            "<ul>\n<li>a</li>\n</ul>",
            "<ol>\n<li>a</li>\n</ol>",
            "<blockquote>q</blockquote>",
            "<hr>",
        ] {
            assert_eq!(bare(block), block);
        }
    }

    #[test]
    fn test_inline_tags_wrapped() {
        assert_eq!(bare("<strong>b</strong>"), "<p><strong>b</strong></p>");
        assert_eq!(bare("<em>i</em>"), "<p><em>i</em></p>");
    }

    #[test]
    fn test_paragraph_policy_wraps_everything() {
        let out = paragraphs("<h1>T</h1>\n\ntext", &ProtectedSpans::new(), BlockWrap::Paragraph);
        assert_eq!(out, "<p><h1>T</h1></p>\n<p>text</p>");
    }

    #[test]
    fn test_token_judged_by_fragment() {
        let mut spans = ProtectedSpans::new();
        let pre = spans.protect("<pre><code>x</code></pre>".to_owned(), "x".to_owned());
        let code = spans.protect("<code>y</code>".to_owned(), "y".to_owned());
        let out = paragraphs(&format!("{pre}\n\n{code} tail"), &spans, BlockWrap::Bare);
        assert_eq!(out, format!("{pre}\n<p>{code} tail</p>"));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(bare(""), "");
        assert_eq!(bare("\n\n  \n"), "");
    }

    #[test]
    fn test_blocks_trimmed() {
        assert_eq!(bare("\n\n  text  \n\n"), "<p>text</p>");
    }
}
