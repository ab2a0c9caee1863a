//! Model loading and type-name resolution for commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use textcast_model::ModelRegistry;
use textcast_types::TypeDescriptor;

/// Environment variable naming a default model file
pub const MODEL_ENV: &str = "TEXTCAST_MODEL";

/// Model file from the command line, falling back to `TEXTCAST_MODEL`
pub fn model_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(MODEL_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}

/// Load a model file (.xml or .json)
pub fn load_model(path: &Path) -> Result<ModelRegistry> {
    let registry = ModelRegistry::from_file(path)
        .with_context(|| format!("Failed to load model: {}", path.display()))?;
    log::info!(
        "using model '{}' {} ({} types)",
        registry.model_name(),
        registry.model_version(),
        registry.type_names().len()
    );
    Ok(registry)
}

/// Load the model if one was given
pub fn load_optional_model(explicit: Option<PathBuf>) -> Result<Option<ModelRegistry>> {
    model_path(explicit).map(|path| load_model(&path)).transpose()
}

/// Load the model, failing if none was given
pub fn require_model(explicit: Option<PathBuf>) -> Result<ModelRegistry> {
    let path = model_path(explicit).with_context(|| {
        format!("No model given; pass --model or set {}", MODEL_ENV)
    })?;
    load_model(&path)
}

/// Parse descriptor syntax, resolving names against the model when present
pub fn parse_type(registry: Option<&ModelRegistry>, text: &str) -> Result<TypeDescriptor> {
    let descriptor = match registry {
        Some(registry) => registry.descriptor(text)?,
        None => text
            .parse()
            .with_context(|| format!("Invalid type descriptor '{}'", text))?,
    };
    log::debug!("target type {}", descriptor.qualified_name());
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_without_model() {
        let descriptor = parse_type(None, "List<Int32?>").unwrap();
        assert_eq!(descriptor.to_string(), "List<Int32?>");
        assert!(parse_type(None, "List<").is_err());
    }

    #[test]
    fn test_parse_type_with_model() {
        let registry = ModelRegistry::from_json(
            r#"{"name": "M", "typeInfo": [{"name": "Level", "kind": "enum", "member": ["Low", "High"]}]}"#,
        )
        .unwrap();
        let descriptor = parse_type(Some(&registry), "Level[]").unwrap();
        assert!(descriptor.element_type().unwrap().as_enum().is_some());
    }

    #[test]
    fn test_explicit_model_path_wins() {
        let explicit = PathBuf::from("given.json");
        assert_eq!(model_path(Some(explicit.clone())), Some(explicit));
    }
}
