//! Inspect command implementation

use super::model;
use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use textcast_coerce::Coercer;
use textcast_model::{collect_static_fields, is_numeric, list_interfaces, ModelRegistry};
use textcast_types::{TypeDescriptor, Value};

/// Configuration for inspect command
pub struct InspectConfig {
    pub type_name: String,
    pub element: Option<String>,
    pub model: Option<PathBuf>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Static field with its initial value coerced to the declared type
struct InspectedField {
    name: String,
    declared_type: TypeDescriptor,
    text: Option<String>,
    value: Option<Value>,
}

/// Describe a type: numeric flag, interfaces and matching static fields
pub fn inspect(config: InspectConfig) -> Result<()> {
    let registry = model::load_optional_model(config.model.clone())?;
    let content = run(registry.as_ref(), &config)?;
    output::write_output(&content, config.output_file.as_deref())
}

fn run(registry: Option<&ModelRegistry>, config: &InspectConfig) -> Result<String> {
    let ty = model::parse_type(registry, &config.type_name)?;
    let numeric = is_numeric(&ty);

    let (interfaces, fields) = match registry {
        Some(registry) if ty.model_key().is_some() => {
            let interfaces = list_interfaces(registry, &ty)?;
            let element = match &config.element {
                Some(text) => model::parse_type(Some(registry), text)?,
                None => ty.clone(),
            };
            let fields = inspect_static_fields(registry, &ty, &element)?;
            (interfaces, fields)
        }
        _ => {
            if ty.model_key().is_some() {
                log::warn!("no model loaded; interfaces and static fields of {} are unknown", ty);
            }
            (Vec::new(), Vec::new())
        }
    };

    let report = json!({
        "type": ty.qualified_name(),
        "numeric": numeric,
        "interfaces": interfaces.iter().map(TypeDescriptor::qualified_name).collect::<Vec<_>>(),
        "staticFields": fields
            .iter()
            .map(|field| json!({
                "name": field.name,
                "type": field.declared_type.to_string(),
                "text": field.text,
                "value": field.value,
            }))
            .collect::<Vec<_>>(),
    });
    output::render(&report, || text_report(&ty, numeric, &interfaces, &fields), config.format)
}

fn inspect_static_fields(
    registry: &ModelRegistry,
    container: &TypeDescriptor,
    element: &TypeDescriptor,
) -> Result<Vec<InspectedField>> {
    let coercer = Coercer::global();
    let mut inspected = Vec::new();
    for field in collect_static_fields(registry, container, element)? {
        let value = match &field.value {
            Some(text) => coercer
                .convert(Some(&field.declared_type), text)
                .with_context(|| format!("Failed to coerce initial value of {}", field.name))?,
            None => None,
        };
        inspected.push(InspectedField {
            name: field.name,
            declared_type: field.declared_type,
            text: field.value,
            value,
        });
    }
    Ok(inspected)
}

fn text_report(
    ty: &TypeDescriptor,
    numeric: bool,
    interfaces: &[TypeDescriptor],
    fields: &[InspectedField],
) -> String {
    let mut lines = vec![
        ty.qualified_name().cyan().bold().to_string(),
        format!("  numeric: {}", numeric),
    ];

    if interfaces.is_empty() {
        lines.push("  interfaces: (none)".to_string());
    } else {
        let names: Vec<_> = interfaces.iter().map(TypeDescriptor::qualified_name).collect();
        lines.push(format!("  interfaces: {}", names.join(", ")));
    }

    if fields.is_empty() {
        lines.push("  static fields: (none)".to_string());
    } else {
        lines.push("  static fields:".to_string());
        for field in fields {
            let value = match &field.text {
                Some(_) => output::format_value(field.value.as_ref()),
                None => "(uninitialized)".dimmed().to_string(),
            };
            lines.push(format!("    {}: {} = {}", field.name, field.declared_type, value));
        }
    }

    lines.join("\n")
}
