//! Convert command implementation

use super::model;
use super::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use textcast_coerce::{Coercer, CoercerOptions, EmptySequence};
use textcast_types::{TypeDescriptor, Value};

/// Configuration for convert command
pub struct ConvertConfig {
    pub type_name: String,
    pub text: String,
    pub model: Option<PathBuf>,
    pub single_token: bool,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Coerce text to the requested type and print the result
pub fn convert(config: ConvertConfig) -> Result<()> {
    let content = run(&config)?;
    output::write_output(&content, config.output_file.as_deref())
}

fn run(config: &ConvertConfig) -> Result<String> {
    let registry = model::load_optional_model(config.model.clone())?;
    let target = model::parse_type(registry.as_ref(), &config.type_name)?;

    let empty_sequence = if config.single_token {
        EmptySequence::SingleToken
    } else {
        EmptySequence::Empty
    };
    let coercer = Coercer::with_options(CoercerOptions::new().with_empty_sequence(empty_sequence));
    let value = coercer.convert(Some(&target), &config.text)?;

    render(&target, value.as_ref(), config.format)
}

fn render(target: &TypeDescriptor, value: Option<&Value>, format: OutputFormat) -> Result<String> {
    let report = json!({
        "type": target.to_string(),
        "value": value,
    });
    output::render(
        &report,
        || format!("{} = {}", target.to_string().cyan(), output::format_value(value)),
        format,
    )
}
