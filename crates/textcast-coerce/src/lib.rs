//! Text-to-value coercion
//!
//! This crate converts text fragments (configuration values, command-line
//! arguments, query parameters) into typed [`Value`]s described by a
//! [`TypeDescriptor`]:
//!
//! - **Primitives**: integers of every width, floats, decimal, boolean,
//!   date/time kinds, GUID, URI, char and string
//! - **Nullable**: empty text means "no value"
//! - **Arrays and lists**: comma-separated tokens, coerced one by one
//! - **Enums**: member names, matched case-insensitively
//!
//! Parse failure is ordinary data and comes back as `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use textcast_coerce::convert;
//! use textcast_types::{PrimitiveKind, TypeDescriptor, Value};
//!
//! let target = TypeDescriptor::array(PrimitiveKind::Int32.into());
//! let value = convert(Some(&target), "1, 2,3").unwrap();
//! assert_eq!(
//!     value,
//!     Some(Value::Array(vec![
//!         Some(Value::Int32(1)),
//!         Some(Value::Int32(2)),
//!         Some(Value::Int32(3)),
//!     ]))
//! );
//! ```
//!
//! # Architecture
//!
//! - `parsers`: immutable primitive parser table
//! - `collections`: per-element list construction strategies, cached
//! - `names`: memoized serialized-name lookup over an annotation reader
//! - `engine`: the [`Coercer`] that ties them together

pub mod collections;
pub mod engine;
pub mod error;
pub mod names;
pub mod options;
pub mod parsers;
pub mod tokenizer;

pub use collections::{CollectionFactoryCache, ElementFactory};
pub use engine::{convert, Coercer};
pub use error::{CoerceError, CoerceResult};
pub use names::NameCache;
pub use options::{CoercerOptions, EmptySequence};
pub use parsers::{parse_primitive, ParserFn, ParserTable};

pub use textcast_types::{TypeDescriptor, Value};
