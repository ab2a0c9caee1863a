//! Model registry implementing MetadataProvider
//!
//! This module provides a concrete implementation of MetadataProvider and
//! AnnotationReader backed by a loaded ModelInfo.

use crate::model_info::{ModelInfo, ParseError, TypeInfo, TypeKind};
use crate::provider::{
    AnnotationReader, MetadataProvider, ModelProviderError, ModelResult,
};
use parking_lot::RwLock;
use std::sync::Arc;
use textcast_types::{EnumType, TypeDescriptor};

/// Model registry that implements MetadataProvider
#[derive(Clone, Default)]
pub struct ModelRegistry {
    model_info: Arc<RwLock<ModelInfo>>,
}

impl ModelRegistry {
    /// Create a new model registry from ModelInfo
    pub fn new(model_info: ModelInfo) -> Self {
        Self {
            model_info: Arc::new(RwLock::new(model_info)),
        }
    }

    /// Load ModelInfo from XML string
    pub fn from_xml(xml: &str) -> ModelResult<Self> {
        crate::model_info::parse_xml(xml)
            .map(|model_info| Self::loaded(model_info, "XML"))
            .map_err(load_error)
    }

    /// Load ModelInfo from JSON string
    pub fn from_json(json: &str) -> ModelResult<Self> {
        crate::model_info::parse_json(json)
            .map(|model_info| Self::loaded(model_info, "JSON"))
            .map_err(load_error)
    }

    /// Load ModelInfo from XML file at runtime
    pub fn from_xml_file(path: impl AsRef<std::path::Path>) -> ModelResult<Self> {
        crate::model_info::parse_xml_file(path)
            .map(|model_info| Self::loaded(model_info, "XML"))
            .map_err(load_error)
    }

    /// Load ModelInfo from JSON file at runtime
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> ModelResult<Self> {
        crate::model_info::parse_json_file(path)
            .map(|model_info| Self::loaded(model_info, "JSON"))
            .map_err(load_error)
    }

    fn loaded(model_info: ModelInfo, format: &str) -> Self {
        log::debug!(
            "loaded model '{}' with {} types from {}",
            model_info.name,
            model_info.type_infos.len(),
            format
        );
        Self::new(model_info)
    }

    /// Auto-detect and load ModelInfo from file based on extension (.xml or .json)
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("xml") => Self::from_xml_file(path),
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(ModelProviderError::ParseError(format!(
                "Unsupported file extension: .{}. Expected .xml or .json",
                ext
            ))),
            None => Err(ModelProviderError::ParseError(
                "No file extension found. Expected .xml or .json".to_string(),
            )),
        }
    }

    /// Get the model name
    pub fn model_name(&self) -> String {
        self.model_info.read().name.clone()
    }

    /// Get the model version
    pub fn model_version(&self) -> String {
        self.model_info.read().version.clone()
    }

    /// Get the model URL
    pub fn model_url(&self) -> String {
        self.model_info.read().url.clone()
    }

    /// Qualified names of all registered types, in declaration order
    pub fn type_names(&self) -> Vec<String> {
        self.model_info.read().type_infos.keys().cloned().collect()
    }

    /// Register (or replace) a type definition
    pub fn register_type(&self, type_info: TypeInfo) {
        log::trace!("registering type {}", type_info.qualified_name());
        self.model_info.write().insert(type_info);
    }

    /// Parse descriptor syntax, resolving names against this model
    ///
    /// Names not in the model fall back to unresolved named types.
    pub fn descriptor(&self, text: &str) -> ModelResult<TypeDescriptor> {
        TypeDescriptor::parse_with(text, |name| self.resolve_name(name)).map_err(|e| {
            ModelProviderError::InvalidDescriptor {
                text: text.to_string(),
                message: e.to_string(),
            }
        })
    }
}

fn load_error(error: ParseError) -> ModelProviderError {
    match error {
        ParseError::IoError(e) => ModelProviderError::IoError(e.to_string()),
        other => ModelProviderError::ParseError(other.to_string()),
    }
}

fn descriptor_for(type_info: &TypeInfo) -> TypeDescriptor {
    let qualified_name = type_info.qualified_name();
    match type_info.kind {
        TypeKind::Enum => TypeDescriptor::Enum(EnumType::with_members(
            qualified_name,
            type_info.members.clone(),
        )),
        TypeKind::Class | TypeKind::Struct | TypeKind::Interface => {
            TypeDescriptor::qualified(&qualified_name)
        }
    }
}

impl MetadataProvider for ModelRegistry {
    fn get_type(&self, type_name: &str) -> Option<TypeInfo> {
        let model = self.model_info.read();
        model.get_type(type_name).cloned()
    }

    fn resolve_name(&self, type_name: &str) -> Option<TypeDescriptor> {
        let model = self.model_info.read();
        model.get_type(type_name).map(descriptor_for)
    }

    fn is_derived_from(&self, child: &str, parent: &str) -> bool {
        let model = self.model_info.read();
        model.is_derived_from(child, parent)
    }
}

impl AnnotationReader for ModelRegistry {
    fn serialized_name(&self, ty: &TypeDescriptor, field: &str) -> Option<String> {
        let key = ty.model_key()?;
        let model = self.model_info.read();
        model
            .get_element(&key, field)
            .and_then(|element| element.serialized_name.clone())
    }
}
