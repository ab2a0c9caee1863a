//! Metadata provider traits

use crate::model_info::TypeInfo;
use textcast_types::TypeDescriptor;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelProviderError>;

/// Trait for providing type metadata (fields, interfaces, enum members)
pub trait MetadataProvider: Send + Sync {
    /// Get type information by qualified or unique simple name
    fn get_type(&self, type_name: &str) -> Option<TypeInfo>;

    /// Resolve a single type name to a descriptor
    ///
    /// Enum types resolve to [`TypeDescriptor::Enum`] with their member
    /// table; other known types resolve to [`TypeDescriptor::Named`].
    fn resolve_name(&self, type_name: &str) -> Option<TypeDescriptor>;

    /// Check if `child` derives from or implements `parent`
    fn is_derived_from(&self, child: &str, parent: &str) -> bool;
}

/// Reader for serialization-time field name annotations
pub trait AnnotationReader: Send + Sync {
    /// Declared alternate name of `field` on `ty`, if any
    fn serialized_name(&self, ty: &TypeDescriptor, field: &str) -> Option<String>;
}

/// Model provider error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelProviderError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid type descriptor '{text}': {message}")]
    InvalidDescriptor { text: String, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(String),
}
