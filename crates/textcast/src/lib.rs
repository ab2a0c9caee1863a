//! Typed coercion of text fragments for Rust
//!
//! This crate bundles the textcast components:
//! - Type descriptors and typed values
//! - Runtime-loaded type models (XML or JSON) with introspection
//! - The coercion engine with its parser table and caches
//!
//! # Example
//!
//! ```
//! use textcast::{convert, TypeDescriptor, Value};
//!
//! let target: TypeDescriptor = "Int32?".parse().unwrap();
//! assert_eq!(convert(Some(&target), " 42 ").unwrap(), Some(Value::Int32(42)));
//! assert_eq!(convert(Some(&target), "").unwrap(), None);
//! ```

// Re-export all public APIs from internal crates
pub use textcast_coerce as coerce;
pub use textcast_model as model;
pub use textcast_types as types;

// Convenience re-exports
pub use textcast_coerce::{convert, CoerceError, CoerceResult, Coercer, CoercerOptions, NameCache};
pub use textcast_model::{collect_static_fields, is_numeric, list_interfaces, ModelRegistry};
pub use textcast_types::{PrimitiveKind, TypeDescriptor, Value};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
