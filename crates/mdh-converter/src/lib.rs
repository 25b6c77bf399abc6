//! Ordered-pass markdown to HTML converter.
//!
//! Converts a documented subset of markdown (headings, emphasis,
//! strikethrough, code spans and fenced blocks, links, images, lists,
//! blockquotes, horizontal rules, paragraphs, hard line breaks) into an HTML
//! fragment. Input is untrusted: anything that is not recognized syntax is
//! emitted as escaped literal text.
//!
//! # Architecture
//!
//! Conversion is a fixed sequence of named [`Stage`]s over a working string:
//!
//! 1. Normalize input
//! 2. Extract fenced code blocks and inline code into a protected span table
//! 3. Escape HTML entities in the remaining text
//! 4. Block passes: headings, rules, lists, blockquotes
//! 5. Inline passes: images, links, emphasis, strikethrough, line breaks
//! 6. Paragraph wrapping
//! 7. Restore protected fragments verbatim
//!
//! Protected fragments are represented by inert tokens until the final
//! stage, so code contents never see markdown passes.
//!
//! # Example
//!
//! ```
//! let html = mdh_converter::convert("- a\n- b\n- c");
//! assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>");
//! ```

mod block;
mod code;
mod escape;
mod inline;
mod normalize;
mod options;
mod paragraph;
mod pipeline;
mod protect;

pub use escape::escape_html;
pub use options::{BlockWrap, ConvertOptions, QuotePolicy};
pub use pipeline::{Converter, Stage, convert};
