//! Configuration management for mdh.
//!
//! Parses `mdh.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `output.dir`
//! - `output.title`
//! - `check.fixtures`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override single quote escaping.
    pub escape_single_quotes: Option<bool>,
    /// Override paragraph wrapping of block-level elements.
    pub wrap_block_elements: Option<bool>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override standalone document output.
    pub document: Option<bool>,
    /// Override fixture file for `check`.
    pub fixtures: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdh.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion policy configuration.
    pub convert: ConvertConfig,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Check command configuration (paths are relative strings from TOML).
    check: CheckConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved check configuration (set after loading).
    #[serde(skip)]
    pub check_resolved: CheckConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion policy configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Render `'` as `&#039;`.
    pub escape_single_quotes: bool,
    /// Wrap headings, lists, rules, blockquotes and code blocks in `<p>`.
    pub wrap_block_elements: bool,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
    document: Option<bool>,
    title: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for converted files. `None` writes to stdout.
    pub dir: Option<PathBuf>,
    /// Extension of converted files, without the dot.
    pub extension: String,
    /// Wrap output in a standalone HTML5 page.
    pub document: bool,
    /// Page title used for standalone documents.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: "html".to_owned(),
            document: false,
            title: "Document".to_owned(),
        }
    }
}

/// Raw check configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckConfigRaw {
    fixtures: Option<String>,
}

/// Resolved check configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Default fixture file for `check`.
    pub fixtures: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdh.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the configuration is invalid after CLI settings are applied.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(escape) = settings.escape_single_quotes {
            self.convert.escape_single_quotes = escape;
        }
        if let Some(wrap) = settings.wrap_block_elements {
            self.convert.wrap_block_elements = wrap;
        }
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir = Some(dir.clone());
        }
        if let Some(document) = settings.document {
            self.output_resolved.document = document;
        }
        if let Some(fixtures) = &settings.fixtures {
            self.check_resolved.fixtures = Some(fixtures.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output = &self.output_resolved;
        require_non_empty(&output.extension, "output.extension")?;
        if output.extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::Validation(
                "output.extension must not contain '.' or path separators".to_owned(),
            ));
        }
        if output.document {
            require_non_empty(&output.title, "output.title")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        if let Some(ref title) = self.output.title {
            self.output.title = Some(expand::expand_env(title, "output.title")?);
        }
        if let Some(ref fixtures) = self.check.fixtures {
            self.check.fixtures = Some(expand::expand_env(fixtures, "check.fixtures")?);
        }
        Ok(())
    }

    /// Resolve raw sections, making relative paths absolute against the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = OutputConfig::default();
        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|d| config_dir.join(d)),
            extension: self
                .output
                .extension
                .clone()
                .unwrap_or(defaults.extension),
            document: self.output.document.unwrap_or(defaults.document),
            title: self.output.title.clone().unwrap_or(defaults.title),
        };
        self.check_resolved = CheckConfig {
            fixtures: self.check.fixtures.as_deref().map(|f| config_dir.join(f)),
        };
    }
}
