//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod convert;
pub(crate) mod demo;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use demo::DemoArgs;

use mdh_config::ConvertConfig;
use mdh_converter::{BlockWrap, ConvertOptions, QuotePolicy};

/// Map `[convert]` configuration to converter options.
pub(crate) fn convert_options(config: &ConvertConfig) -> ConvertOptions {
    ConvertOptions::default()
        .with_quotes(quote_policy(config.escape_single_quotes))
        .with_block_wrap(block_wrap(config.wrap_block_elements))
}

pub(crate) fn quote_policy(escape: bool) -> QuotePolicy {
    if escape {
        QuotePolicy::Escape
    } else {
        QuotePolicy::Keep
    }
}

pub(crate) fn block_wrap(wrap: bool) -> BlockWrap {
    if wrap {
        BlockWrap::Paragraph
    } else {
        BlockWrap::Bare
    }
}
