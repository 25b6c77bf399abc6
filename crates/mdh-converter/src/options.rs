//! Conversion options.
//!
//! Source variants of this converter disagreed on two details: whether `'`
//! is escaped, and whether block-level output (headings, lists, rules,
//! blockquotes, code blocks) is wrapped in `<p>`. Both are selectable here;
//! the defaults are [`QuotePolicy::Keep`] and [`BlockWrap::Bare`].

/// How the escaping pass treats the single quote character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QuotePolicy {
    /// Leave `'` as-is.
    #[default]
    Keep,
    /// Render `'` as `&#039;`.
    Escape,
}

/// How the paragraph pass treats blocks that already start with a block-level tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BlockWrap {
    /// Emit block-level elements without a surrounding `<p>`.
    #[default]
    Bare,
    /// Wrap every non-empty block in `<p>`, block-level or not.
    Paragraph,
}

/// Options for a [`Converter`](crate::Converter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertOptions {
    /// Single quote escaping policy.
    pub quotes: QuotePolicy,
    /// Paragraph wrapping policy for block-level elements.
    pub block_wrap: BlockWrap,
}

impl ConvertOptions {
    /// Set the single quote escaping policy.
    #[must_use]
    pub fn with_quotes(mut self, quotes: QuotePolicy) -> Self {
        self.quotes = quotes;
        self
    }

    /// Set the block wrapping policy.
    #[must_use]
    pub fn with_block_wrap(mut self, block_wrap: BlockWrap) -> Self {
        self.block_wrap = block_wrap;
        self
    }
}
