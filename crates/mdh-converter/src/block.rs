//! Block-level structural passes: headings, rules, lists, blockquotes.
//!
//! Each pass rewrites whole lines of the escaped working text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// One to six hashes, required horizontal whitespace, non-blank text.
/// The hash run is greedy, so `######` is never read as a shorter heading.
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,6})[ \t]+([^ \t\n].*?)[ \t]*$").unwrap()
});

static RULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:---|\*\*\*|___)$").unwrap());

/// `>` has already been escaped when this pass runs.
static BLOCKQUOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]+([^ \t\n].*)$").unwrap());

pub(crate) fn headings(text: &str) -> String {
    HEADING_PATTERN
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

pub(crate) fn rules(text: &str) -> String {
    RULE_PATTERN.replace_all(text, "<hr>").into_owned()
}

pub(crate) fn blockquotes(text: &str) -> String {
    BLOCKQUOTE_PATTERN
        .replace_all(text, "<blockquote>${1}</blockquote>")
        .into_owned()
}

/// Wrap runs of list item lines, unordered first.
///
/// The ordered pass only recognizes raw `N. text` lines, so runs already
/// turned into `<li>` by the unordered pass are never wrapped twice. Adjacent
/// runs of different kinds become two separate lists.
pub(crate) fn lists(text: &str) -> String {
    let text = wrap_runs(text, ListKind::Unordered);
    wrap_runs(&text, ListKind::Ordered)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }

    /// Item text if `line` is a list item of this kind.
    fn item(self, line: &str) -> Option<&str> {
        let rest = match self {
            Self::Unordered => line.strip_prefix(['-', '*'])?,
            Self::Ordered => {
                let digits = line.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 {
                    return None;
                }
                line[digits..].strip_prefix('.')?
            }
        };
        let content = rest.trim_start_matches([' ', '\t']);
        if content.len() == rest.len() {
            // Marker must be followed by whitespace.
            return None;
        }
        let content = content.trim_end_matches([' ', '\t']);
        (!content.is_empty()).then_some(content)
    }
}

fn wrap_runs(text: &str, kind: ListKind) -> String {
    let tag = kind.tag();
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for (idx, line) in text.split('\n').enumerate() {
        let item = kind.item(line);
        if in_run && item.is_none() {
            out.push_str("\n</");
            out.push_str(tag);
            out.push('>');
            in_run = false;
        }
        if idx > 0 {
            out.push('\n');
        }
        match item {
            Some(content) => {
                if !in_run {
                    out.push('<');
                    out.push_str(tag);
                    out.push_str(">\n");
                    in_run = true;
                }
                out.push_str("<li>");
                out.push_str(content);
                out.push_str("</li>");
            }
            None => out.push_str(line),
        }
    }

    if in_run {
        out.push_str("\n</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(headings("# One"), "<h1>One</h1>");
        assert_eq!(headings("## Two"), "<h2>Two</h2>");
        assert_eq!(headings("### Three"), "<h3>Three</h3>");
        assert_eq!(headings("#### Four"), "<h4>Four</h4>");
        assert_eq!(headings("##### Five"), "<h5>Five</h5>");
        assert_eq!(headings("###### Six"), "<h6>Six</h6>");
    }

    #[test]
    fn test_six_hashes_not_partially_matched() {
        assert_eq!(headings("###### Deep"), "<h6>Deep</h6>");
    }

    #[test]
    fn test_seven_hashes_not_a_heading() {
        assert_eq!(headings("####### Too deep"), "####### Too deep");
    }

    #[test]
    fn test_heading_requires_whitespace() {
        assert_eq!(headings("#hashtag"), "#hashtag");
    }

    #[test]
    fn test_heading_without_text_is_literal() {
        assert_eq!(headings("#   "), "#   ");
    }

    #[test]
    fn test_heading_does_not_swallow_next_line() {
        assert_eq!(headings("#\nfoo"), "#\nfoo");
    }

    #[test]
    fn test_heading_trailing_whitespace_dropped() {
        assert_eq!(headings("## Title  "), "<h2>Title</h2>");
    }

    #[test]
    fn test_heading_only_at_line_start() {
        assert_eq!(headings("text # not\n# yes"), "text # not\n<h1>yes</h1>");
    }

    #[test]
    fn test_rules() {
        assert_eq!(rules("---"), "<hr>");
        assert_eq!(rules("***"), "<hr>");
        assert_eq!(rules("___"), "<hr>");
        assert_eq!(rules("a\n---\nb"), "a\n<hr>\nb");
    }

    #[test]
    fn test_rule_must_be_whole_line() {
        assert_eq!(rules("----"), "----");
        assert_eq!(rules("--- x"), "--- x");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            lists("- a\n- b\n- c"),
            "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>"
        );
    }

    #[test]
    fn test_star_marker() {
        assert_eq!(lists("* a\n* b"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            lists("1. First\n2. Second\n10. Tenth"),
            "<ol>\n<li>First</li>\n<li>Second</li>\n<li>Tenth</li>\n</ol>"
        );
    }

    #[test]
    fn test_mixed_markers_are_separate_lists() {
        assert_eq!(
            lists("- a\n1. b"),
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_surrounded_by_text() {
        assert_eq!(
            lists("intro\n- a\n- b\noutro"),
            "intro\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\noutro"
        );
    }

    #[test]
    fn test_blank_line_splits_runs() {
        assert_eq!(
            lists("- a\n\n- b"),
            "<ul>\n<li>a</li>\n</ul>\n\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_trailing_newline_preserved() {
        assert_eq!(lists("- a\n"), "<ul>\n<li>a</li>\n</ul>\n");
    }

    #[test]
    fn test_marker_requires_whitespace() {
        assert_eq!(lists("-a\n1.b\n*a*"), "-a\n1.b\n*a*");
    }

    #[test]
    fn test_empty_item_is_literal() {
        assert_eq!(lists("- \n1. "), "- \n1. ");
    }

    #[test]
    fn test_decimal_number_is_not_an_item() {
        assert_eq!(lists("3.14 is pi"), "3.14 is pi");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(blockquotes("&gt; Quote"), "<blockquote>Quote</blockquote>");
    }

    #[test]
    fn test_blockquote_single_line_only() {
        assert_eq!(
            blockquotes("&gt; one\n&gt; two"),
            "<blockquote>one</blockquote>\n<blockquote>two</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_requires_whitespace() {
        assert_eq!(blockquotes("&gt;quote"), "&gt;quote");
    }
}
