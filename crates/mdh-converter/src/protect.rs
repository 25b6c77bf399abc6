//! Protected span table.
//!
//! Finalized HTML fragments (code blocks, inline code, image and link tags)
//! are swapped out of the working text for inert placeholder tokens and put
//! back verbatim at the end of the pipeline.
//!
//! Token grammar: `U+E000 <decimal index> U+E001`. Normalization replaces both
//! sentinels in user input and escaping never produces them, so a token can
//! only come from [`ProtectedSpans::protect`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Opening sentinel of a placeholder token.
pub(crate) const TOKEN_OPEN: char = '\u{E000}';
/// Closing sentinel of a placeholder token.
pub(crate) const TOKEN_CLOSE: char = '\u{E001}';

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap());

/// A finalized fragment and the text it reads as inside an attribute value.
#[derive(Debug)]
struct Span {
    html: String,
    text: String,
}

/// Ordered mapping from placeholder token to finalized fragment.
///
/// Lives for a single conversion call.
#[derive(Debug, Default)]
pub(crate) struct ProtectedSpans {
    spans: Vec<Span>,
}

impl ProtectedSpans {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a finalized fragment and return the token standing in for it.
    ///
    /// `text` is the escaped plain text substituted by [`Self::resolve_text`]
    /// when the token ends up inside an attribute value.
    pub(crate) fn protect(&mut self, html: String, text: String) -> String {
        let index = self.spans.len();
        self.spans.push(Span { html, text });
        format!("{TOKEN_OPEN}{index}{TOKEN_CLOSE}")
    }

    pub(crate) fn len(&self) -> usize {
        self.spans.len()
    }

    /// Fragment for the token at the very start of `text`, if any.
    pub(crate) fn leading_fragment(&self, text: &str) -> Option<&str> {
        let rest = text.strip_prefix(TOKEN_OPEN)?;
        let end = rest.find(TOKEN_CLOSE)?;
        let index: usize = rest[..end].parse().ok()?;
        self.spans.get(index).map(|span| span.html.as_str())
    }

    /// Substitute every token with its plain text form.
    ///
    /// Used for attribute values, which must not carry markup or tokens.
    pub(crate) fn resolve_text(&self, text: &str) -> String {
        self.substitute(text, |span| &span.text)
    }

    /// Substitute every token with its fragment, literally.
    pub(crate) fn restore(&self, text: &str) -> String {
        self.substitute(text, |span| &span.html)
    }

    fn substitute(&self, text: &str, pick: impl Fn(&Span) -> &String) -> String {
        if self.spans.is_empty() {
            return text.to_owned();
        }
        TOKEN_PATTERN
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.spans.get(index))
                    .map_or_else(|| caps[0].to_owned(), |span| pick(span).clone())
            })
            .into_owned()
    }
}
