//! `mdh check` command implementation.
//!
//! Fixture files are TOML documents with one `[[case]]` table per
//! conversion:
//!
//! ```toml
//! [[case]]
//! name = "heading"
//! input = "# Hello"
//! expected = "<h1>Hello</h1>"
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use mdh_config::{CliSettings, Config, ConvertConfig};
use mdh_converter::Converter;
use serde::Deserialize;

use super::{block_wrap, convert_options, quote_policy};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Fixture file (default: `check.fixtures` from config).
    fixtures: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdh.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(rename = "case", default)]
    cases: Vec<Case>,
}

/// A single expected conversion.
#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: String,
    expected: String,
    /// Per-case override of `convert.escape_single_quotes`.
    escape_single_quotes: Option<bool>,
    /// Per-case override of `convert.wrap_block_elements`.
    wrap_block_elements: Option<bool>,
}

impl Case {
    fn converter(&self, defaults: &ConvertConfig) -> Converter {
        let mut options = convert_options(defaults);
        if let Some(escape) = self.escape_single_quotes {
            options = options.with_quotes(quote_policy(escape));
        }
        if let Some(wrap) = self.wrap_block_elements {
            options = options.with_block_wrap(block_wrap(wrap));
        }
        Converter::new(options)
    }
}

/// Outcome of running one case.
struct CaseResult<'a> {
    case: &'a Case,
    actual: String,
}

impl CaseResult<'_> {
    fn passed(&self) -> bool {
        self.actual == self.case.expected
    }
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            fixtures: self.fixtures.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let path = config.check_resolved.fixtures.clone().ok_or_else(|| {
            CliError::Validation(
                "no fixture file given (pass a path or set check.fixtures in mdh.toml)".to_owned(),
            )
        })?;

        let fixtures = load_fixtures(&path)?;
        output.info(&format!(
            "Running {} cases from {}",
            fixtures.cases.len(),
            path.display()
        ));

        let results = run_cases(&fixtures.cases, &config.convert);
        let mut failed = 0;
        for result in &results {
            if result.passed() {
                output.success(&format!("\u{2713} {}", result.case.name));
            } else {
                failed += 1;
                output.error(&format!("\u{2717} {}", result.case.name));
                output.detail(&format!("  expected: {:?}", result.case.expected));
                output.detail(&format!("  actual:   {:?}", result.actual));
            }
        }

        let total = results.len();
        tracing::info!(total, failed, "Fixture check complete");
        if failed > 0 {
            return Err(CliError::CheckFailed { failed, total });
        }

        output.success(&format!("All {total} cases passed"));
        Ok(())
    }
}

fn load_fixtures(path: &Path) -> Result<FixtureFile, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixtures(&content).map_err(|source| CliError::Fixtures {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_fixtures(content: &str) -> Result<FixtureFile, toml::de::Error> {
    toml::from_str(content)
}

fn run_cases<'a>(cases: &'a [Case], defaults: &ConvertConfig) -> Vec<CaseResult<'a>> {
    cases
        .iter()
        .map(|case| CaseResult {
            case,
            actual: case.converter(defaults).convert(&case.input),
        })
        .collect()
}
