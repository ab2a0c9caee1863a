//! Name command implementation

use super::model;
use super::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use textcast_coerce::NameCache;

/// Configuration for name command
pub struct NameConfig {
    pub type_name: String,
    pub fields: Vec<String>,
    pub model: Option<PathBuf>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Print the serialized names of fields on a model type
pub fn name(config: NameConfig) -> Result<()> {
    let registry = model::require_model(config.model.clone())?;
    let content = run(registry, &config)?;
    output::write_output(&content, config.output_file.as_deref())
}

fn run(registry: textcast_model::ModelRegistry, config: &NameConfig) -> Result<String> {
    let ty = model::parse_type(Some(&registry), &config.type_name)?;
    let cache = NameCache::new(registry);

    let mut resolved = Vec::with_capacity(config.fields.len());
    for field in &config.fields {
        resolved.push((field.as_str(), cache.resolve(&ty, field)?));
    }

    let report = json!({
        "type": ty.qualified_name(),
        "fields": resolved
            .iter()
            .map(|(field, name)| json!({"field": field, "serializedName": name}))
            .collect::<Vec<_>>(),
    });
    output::render(
        &report,
        || {
            resolved
                .iter()
                .map(|(field, name)| format!("{}.{} -> {}", ty.name().cyan(), field, name.green()))
                .collect::<Vec<_>>()
                .join("\n")
        },
        config.format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcast_model::ModelRegistry;

    const MODEL: &str = r#"{
        "name": "Shop",
        "typeInfo": [
            {"name": "Order", "namespace": "Shop", "element": [
                {"name": "PlacedOn", "type": "DateOnly", "serializedName": "placed_on"},
                {"name": "Notes", "type": "String"}
            ]}
        ]
    }"#;

    fn config(fields: &[&str], format: OutputFormat) -> NameConfig {
        NameConfig {
            type_name: "Order".to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            model: None,
            format,
            output_file: None,
        }
    }

    #[test]
    fn test_name_text_output() {
        colored::control::set_override(false);
        let registry = ModelRegistry::from_json(MODEL).unwrap();
        let out = run(registry, &config(&["PlacedOn", "Notes"], OutputFormat::Text)).unwrap();
        assert_eq!(out, "Order.PlacedOn -> placed_on\nOrder.Notes -> Notes");
    }

    #[test]
    fn test_name_json_output() {
        let registry = ModelRegistry::from_json(MODEL).unwrap();
        let out = run(registry, &config(&["PlacedOn"], OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!({
                "type": "Shop.Order",
                "fields": [{"field": "PlacedOn", "serializedName": "placed_on"}],
            })
        );
    }

    #[test]
    fn test_empty_field_fails() {
        let registry = ModelRegistry::from_json(MODEL).unwrap();
        assert!(run(registry, &config(&[""], OutputFormat::Text)).is_err());
    }
}
