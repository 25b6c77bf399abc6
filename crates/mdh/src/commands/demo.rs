//! `mdh demo` command implementation.

use clap::Args;
use mdh_converter::convert;

use crate::error::CliError;
use crate::output::Output;

const SAMPLES: &[(&str, &str)] = &[
    ("Heading", "# Heading 1"),
    ("Emphasis", "**bold** and *italic*"),
    ("List", "- a\n- b\n- c"),
    ("Ordered list", "1. First\n2. Second\n3. Third"),
    ("Escaping", "<script>alert(\"x\")</script>"),
    ("Code block", "```js\nlet x=1;\n```"),
    (
        "Document",
        "# Notice\n\nWater is **off** on *Monday*.\n\n## Steps\n- Close valves\n- Call `+7 000`\n\n> Thanks\n\n---\n\n[More](https://example.com) ~~later~~",
    ),
];

/// Arguments for the demo command.
#[derive(Args)]
pub(crate) struct DemoArgs {
    /// Only show samples whose title contains this text (case-insensitive).
    filter: Option<String>,
}

impl DemoArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let samples = select(self.filter.as_deref());
        if samples.is_empty() {
            return Err(CliError::Validation(format!(
                "no sample matches {:?}",
                self.filter.unwrap_or_default()
            )));
        }

        for (title, markdown) in samples {
            output.separator();
            output.highlight(title);
            output.detail(markdown);
            output.separator();
            output.html(&convert(markdown))?;
        }

        Ok(())
    }
}

fn select(filter: Option<&str>) -> Vec<(&'static str, &'static str)> {
    let needle = filter.map(str::to_lowercase);
    SAMPLES
        .iter()
        .filter(|(title, _)| {
            needle
                .as_deref()
                .is_none_or(|needle| title.to_lowercase().contains(needle))
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        assert_eq!(select(None).len(), SAMPLES.len());
    }

    #[test]
    fn test_select_filter() {
        let titles: Vec<_> = select(Some("LIST")).into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, ["List", "Ordered list"]);
        assert!(select(Some("nothing")).is_empty());
    }

    #[test]
    fn test_samples_convert_to_html() {
        for (title, markdown) in SAMPLES {
            let html = convert(markdown);
            assert!(html.starts_with('<'), "{title}: {html}");
            assert!(!html.contains('\u{E000}'), "{title}: {html}");
        }
    }
}
