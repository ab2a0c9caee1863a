//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use textcast_types::Value;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

/// Color output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Format an optional coerced value for display
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "(no value)".dimmed().to_string(),
    }
}

/// Format JSON value for output
pub fn format_json(value: &serde_json::Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Render a report as text or JSON
pub fn render(
    json: &serde_json::Value,
    text: impl FnOnce() -> String,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => format_json(json, false),
        OutputFormat::Pretty => format_json(json, true),
    }
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", content)
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        colored::control::set_override(false);
        let report = json!({"type": "Int32", "value": 5});

        assert_eq!(
            render(&report, || "Int32 = 5".to_string(), OutputFormat::Text).unwrap(),
            "Int32 = 5"
        );
        assert_eq!(
            render(&report, String::new, OutputFormat::Json).unwrap(),
            r#"{"type":"Int32","value":5}"#
        );
        assert!(render(&report, String::new, OutputFormat::Pretty)
            .unwrap()
            .contains("\n  \"type\": \"Int32\""));
    }

    #[test]
    fn test_format_missing_value() {
        colored::control::set_override(false);
        assert_eq!(format_value(None), "(no value)");
        assert_eq!(format_value(Some(&Value::Int32(3))), "3");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_output("{}", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
