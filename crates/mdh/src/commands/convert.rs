//! `mdh convert` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use mdh_config::{CliSettings, Config, OutputConfig};
use mdh_converter::{Converter, QuotePolicy, Stage, escape_html};

use super::convert_options;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown files to convert (reads stdin when omitted).
    files: Vec<PathBuf>,

    /// Output directory (overrides config; default: stdout).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Escape single quotes as &#039;.
    #[arg(long)]
    escape_single_quotes: bool,

    /// Wrap block-level elements in <p> as well.
    #[arg(long)]
    wrap_blocks: bool,

    /// Emit a standalone HTML page instead of a fragment.
    #[arg(long)]
    document: bool,

    /// Print the working text after every pipeline stage to stderr.
    #[arg(long)]
    stages: bool,

    /// Path to configuration file (default: auto-discover mdh.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            escape_single_quotes: self.escape_single_quotes.then_some(true),
            wrap_block_elements: self.wrap_blocks.then_some(true),
            output_dir: self.output_dir.clone(),
            document: self.document.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let converter = Converter::new(convert_options(&config.convert));
        let out_config = &config.output_resolved;

        if self.files.is_empty() {
            let mut markdown = String::new();
            std::io::stdin().read_to_string(&mut markdown)?;
            let html = render(&converter, &markdown, out_config, self.stages, &output);
            output.html(&html)?;
            return Ok(());
        }

        if let Some(dir) = &out_config.dir {
            std::fs::create_dir_all(dir).map_err(|source| CliError::File {
                path: dir.clone(),
                source,
            })?;
        }

        for path in &self.files {
            let markdown = std::fs::read_to_string(path).map_err(|source| CliError::File {
                path: path.clone(),
                source,
            })?;
            let html = render(&converter, &markdown, out_config, self.stages, &output);

            match &out_config.dir {
                Some(dir) => {
                    let target = output_path(path, dir, &out_config.extension)?;
                    std::fs::write(&target, html).map_err(|source| CliError::File {
                        path: target.clone(),
                        source,
                    })?;
                    tracing::info!(source = %path.display(), target = %target.display(), "Converted");
                    output.success(&format!(
                        "{} -> {}",
                        path.display(),
                        target.display()
                    ));
                }
                None => output.html(&html)?,
            }
        }

        Ok(())
    }
}

fn render(
    converter: &Converter,
    markdown: &str,
    out_config: &OutputConfig,
    show_stages: bool,
    output: &Output,
) -> String {
    let html = if show_stages {
        converter.convert_observed(markdown, |stage, text| print_stage(output, stage, text))
    } else {
        converter.convert(markdown)
    };

    if out_config.document {
        wrap_document(&html, &out_config.title)
    } else {
        html
    }
}

fn print_stage(output: &Output, stage: Stage, text: &str) {
    output.highlight(&format!("--- {stage}"));
    // Make placeholder tokens visible.
    output.detail(&text.replace('\u{E000}', "\u{27E6}").replace('\u{E001}', "\u{27E7}"));
}

/// Target path for a converted file: `<dir>/<stem>.<extension>`.
fn output_path(source: &Path, dir: &Path, extension: &str) -> Result<PathBuf, CliError> {
    let stem = source.file_stem().ok_or_else(|| {
        CliError::Validation(format!("cannot derive output name from {}", source.display()))
    })?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    Ok(dir.join(name))
}

/// Wrap an HTML fragment in a minimal standalone HTML5 page.
fn wrap_document(body: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title, QuotePolicy::Keep)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_output_path() {
        let target = output_path(Path::new("docs/notice.md"), Path::new("/out"), "html").unwrap();
        assert_eq!(target, PathBuf::from("/out/notice.html"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let target = output_path(Path::new("README"), Path::new("out"), "htm").unwrap();
        assert_eq!(target, PathBuf::from("out/README.htm"));
    }

    #[test]
    fn test_output_path_keeps_inner_dots() {
        let target = output_path(Path::new("notes.v2.md"), Path::new("out"), "html").unwrap();
        assert_eq!(target, PathBuf::from("out/notes.v2.html"));
    }

    #[test]
    fn test_output_path_no_file_name() {
        assert!(output_path(Path::new("/"), Path::new("out"), "html").is_err());
    }

    #[test]
    fn test_wrap_document() {
        let page = wrap_document("<p>x</p>", "A <b> & C");
        assert_eq!(
            page,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>A &lt;b&gt; &amp; C</title>\n</head>\n<body>\n<p>x</p>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn test_render_fragment_and_document() {
        let output = Output::new();
        let converter = Converter::default();
        let mut config = OutputConfig::default();

        assert_eq!(render(&converter, "# T", &config, false, &output), "<h1>T</h1>");

        config.document = true;
        config.title = "Page".to_owned();
        let page = render(&converter, "# T", &config, false, &output);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Page</title>"));
        assert!(page.contains("<body>\n<h1>T</h1>\n</body>"));
    }

    #[test]
    fn test_render_with_stages_matches_plain() {
        let output = Output::new();
        let converter = Converter::default();
        let config = OutputConfig::default();
        let markdown = "Some `code` and **bold**";
        assert_eq!(
            render(&converter, markdown, &config, true, &output),
            converter.convert(markdown)
        );
    }
}
