//! textcast type-metadata model
//!
//! This crate provides:
//! - ModelInfo definitions for classes, structs, interfaces and enums
//! - XML and JSON model loaders
//! - MetadataProvider and AnnotationReader traits
//! - A ModelRegistry implementing both
//! - Introspection queries (static fields, interfaces, numeric check)

pub mod introspect;
pub mod model_info;
pub mod provider;
pub mod registry;

pub use introspect::*;
pub use model_info::*;
pub use provider::*;
pub use registry::*;
