//! The ordered pass pipeline.

use std::fmt;

use crate::block;
use crate::code;
use crate::escape::escape_html;
use crate::inline;
use crate::normalize::normalize;
use crate::options::ConvertOptions;
use crate::paragraph;
use crate::protect::ProtectedSpans;

/// A single pass of the pipeline.
///
/// Stages run in the order of [`Stage::ALL`]; each consumes the output of the
/// previous one. The order is load-bearing: later passes assume earlier ones
/// have already consumed their syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Strip a byte-order mark, fold line endings, neutralize token sentinels.
    Normalize,
    /// Fenced code blocks to protected `<pre><code>` fragments.
    CodeBlocks,
    /// Backtick spans to protected `<code>` fragments.
    InlineCode,
    /// HTML entity escaping of the remaining text.
    Escape,
    /// `#` headings, longest hash run first.
    Headings,
    /// `---`, `***`, `___` lines.
    Rules,
    /// Unordered then ordered list runs.
    Lists,
    /// Single-line `>` quotes.
    Blockquotes,
    /// `![alt](url)`.
    Images,
    /// `[text](url)`.
    Links,
    /// `***text***` and `___text___`.
    StrongEmphasis,
    /// `**text**` and `__text__`.
    Bold,
    /// `*text*` and `_text_`.
    Italic,
    /// `~~text~~`.
    Strikethrough,
    /// Two trailing spaces before a newline.
    LineBreaks,
    /// Blank-line separated blocks to `<p>`.
    Paragraphs,
    /// Placeholder tokens back to their fragments.
    ///
    /// Tokens stay opaque through every structural and inline pass, so the
    /// restored fragments are never processed further.
    Restore,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Self; 17] = [
        Self::Normalize,
        Self::CodeBlocks,
        Self::InlineCode,
        Self::Escape,
        Self::Headings,
        Self::Rules,
        Self::Lists,
        Self::Blockquotes,
        Self::Images,
        Self::Links,
        Self::StrongEmphasis,
        Self::Bold,
        Self::Italic,
        Self::Strikethrough,
        Self::LineBreaks,
        Self::Paragraphs,
        Self::Restore,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::CodeBlocks => "code-blocks",
            Self::InlineCode => "inline-code",
            Self::Escape => "escape",
            Self::Headings => "headings",
            Self::Rules => "rules",
            Self::Lists => "lists",
            Self::Blockquotes => "blockquotes",
            Self::Images => "images",
            Self::Links => "links",
            Self::StrongEmphasis => "strong-emphasis",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::LineBreaks => "line-breaks",
            Self::Paragraphs => "paragraphs",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Markdown to HTML converter.
///
/// Stateless between calls: the protected span table is local to each call,
/// so a converter can be shared freely across threads.
///
/// # Example
///
/// ```
/// use mdh_converter::{BlockWrap, ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default().with_block_wrap(BlockWrap::Paragraph));
/// assert_eq!(converter.convert("# Title"), "<p><h1>Title</h1></p>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options.
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options this converter was built with.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Convert markdown source to an HTML fragment.
    ///
    /// Total: malformed or partial syntax degrades to escaped literal text.
    #[must_use]
    pub fn convert(&self, source: &str) -> String {
        self.convert_observed(source, |_, _| {})
    }

    /// Convert, handing the working text to `observer` after every stage.
    ///
    /// Intermediate text may contain placeholder tokens delimited by the
    /// private-use characters U+E000 and U+E001.
    pub fn convert_observed<F>(&self, source: &str, mut observer: F) -> String
    where
        F: FnMut(Stage, &str),
    {
        let mut spans = ProtectedSpans::new();
        let mut text = source.to_owned();
        for stage in Stage::ALL {
            text = self.run_stage(stage, &text, &mut spans);
            tracing::trace!(stage = stage.name(), len = text.len(), "Stage complete");
            observer(stage, &text);
        }
        tracing::debug!(
            input_len = source.len(),
            output_len = text.len(),
            protected_spans = spans.len(),
            "Converted markdown"
        );
        text
    }

    fn run_stage(&self, stage: Stage, text: &str, spans: &mut ProtectedSpans) -> String {
        let quotes = self.options.quotes;
        match stage {
            Stage::Normalize => normalize(text),
            Stage::CodeBlocks => code::extract_code_blocks(text, spans, quotes),
            Stage::InlineCode => code::extract_inline_code(text, spans, quotes),
            Stage::Escape => escape_html(text, quotes),
            Stage::Headings => block::headings(text),
            Stage::Rules => block::rules(text),
            Stage::Lists => block::lists(text),
            Stage::Blockquotes => block::blockquotes(text),
            Stage::Images => inline::images(text, spans),
            Stage::Links => inline::links(text, spans),
            Stage::StrongEmphasis => inline::strong_emphasis(text),
            Stage::Bold => inline::bold(text),
            Stage::Italic => inline::italic(text),
            Stage::Strikethrough => inline::strikethrough(text),
            Stage::LineBreaks => inline::line_breaks(text),
            Stage::Paragraphs => paragraph::paragraphs(text, spans, self.options.block_wrap),
            Stage::Restore => spans.restore(text),
        }
    }
}

/// Convert markdown to HTML with default options.
///
/// # Examples
///
/// ```
/// assert_eq!(mdh_converter::convert("# Heading 1"), "<h1>Heading 1</h1>");
/// assert_eq!(
///     mdh_converter::convert("**bold** and *italic*"),
///     "<p><strong>bold</strong> and <em>italic</em></p>"
/// );
/// assert_eq!(mdh_converter::convert(""), "");
/// ```
#[must_use]
pub fn convert(source: &str) -> String {
    Converter::default().convert(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_stage_names_unique() {
        let mut names: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Stage::ALL.len());
    }

    #[test]
    fn test_observer_sees_every_stage_in_order() {
        let mut seen = Vec::new();
        Converter::default().convert_observed("# x", |stage, _| seen.push(stage));
        assert_eq!(seen, Stage::ALL.to_vec());
    }

    #[test]
    fn test_code_extracted_before_escape() {
        let mut after_escape = String::new();
        Converter::default().convert_observed("`<b>` <i>", |stage, text| {
            if stage == Stage::Escape {
                after_escape = text.to_owned();
            }
        });
        assert!(after_escape.contains("&lt;i&gt;"));
        assert!(!after_escape.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_bold_before_italic() {
        let mut after_bold = String::new();
        Converter::default().convert_observed("**b**", |stage, text| {
            if stage == Stage::Bold {
                after_bold = text.to_owned();
            }
        });
        assert_eq!(after_bold, "<strong>b</strong>");
    }

    #[test]
    fn test_final_stage_matches_output() {
        let mut last = String::new();
        let out = Converter::default().convert_observed("a *b*", |_, text| last = text.to_owned());
        assert_eq!(out, last);
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::StrongEmphasis.to_string(), "strong-emphasis");
    }
}
