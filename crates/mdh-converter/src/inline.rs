//! Span-level passes: images, links, emphasis, strikethrough, hard breaks.
//!
//! All matches are non-greedy and confined to a single line, so a marker in
//! one paragraph never pairs with a marker in another. The `regex` engine
//! guarantees linear-time matching, so long unclosed runs cannot backtrack.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::protect::ProtectedSpans;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]+)\)").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\n]+)\)").unwrap());

static STRONG_EMPHASIS_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap(),
        Regex::new(r"___(.+?)___").unwrap(),
    ]
});

static BOLD_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\*\*(.+?)\*\*").unwrap(),
        Regex::new(r"__(.+?)__").unwrap(),
    ]
});

static ITALIC_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\*(.+?)\*").unwrap(),
        Regex::new(r"_(.+?)_").unwrap(),
    ]
});

static STRIKETHROUGH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());

/// Exactly two spaces: the character before them must not be a space.
static LINE_BREAK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^ \n])  \n").unwrap());

/// `![alt](url)` to `<img>`. Runs before [`links`], whose syntax it contains.
///
/// The finished tag is protected so emphasis markers inside `src` or `alt`
/// stay literal. Code spans inside either attribute are reduced to their
/// escaped text.
pub(crate) fn images(text: &str, spans: &mut ProtectedSpans) -> String {
    IMAGE_PATTERN
        .replace_all(text, |caps: &Captures| {
            let alt = spans.resolve_text(&caps[1]);
            let src = spans.resolve_text(caps[2].trim());
            spans.protect(format!(r#"<img src="{src}" alt="{alt}">"#), alt)
        })
        .into_owned()
}

/// `[text](url)` to `<a>`. The opening tag is protected; the text is not, so
/// it still receives emphasis. Tokens inside the URL are reduced to text.
pub(crate) fn links(text: &str, spans: &mut ProtectedSpans) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &Captures| {
            let href = spans.resolve_text(caps[2].trim());
            let open = spans.protect(format!(r#"<a href="{href}">"#), String::new());
            format!("{open}{}</a>", &caps[1])
        })
        .into_owned()
}

/// `***text***` and `___text___`. Runs before [`bold`] so triple runs nest
/// correctly.
pub(crate) fn strong_emphasis(text: &str) -> String {
    replace_each(text, &*STRONG_EMPHASIS_PATTERNS, "<strong><em>${1}</em></strong>")
}

/// `**text**` and `__text__`. Runs before [`italic`], whose marker is a
/// prefix of this one.
pub(crate) fn bold(text: &str) -> String {
    replace_each(text, &*BOLD_PATTERNS, "<strong>${1}</strong>")
}

pub(crate) fn italic(text: &str) -> String {
    replace_each(text, &*ITALIC_PATTERNS, "<em>${1}</em>")
}

pub(crate) fn strikethrough(text: &str) -> String {
    STRIKETHROUGH_PATTERN
        .replace_all(text, "<del>${1}</del>")
        .into_owned()
}

pub(crate) fn line_breaks(text: &str) -> String {
    LINE_BREAK_PATTERN
        .replace_all(text, "${1}<br>\n")
        .into_owned()
}

fn replace_each(text: &str, patterns: &[Regex], replacement: &str) -> String {
    let mut out = text.to_owned();
    for pattern in patterns {
        out = pattern.replace_all(&out, replacement).into_owned();
    }
    out
}
