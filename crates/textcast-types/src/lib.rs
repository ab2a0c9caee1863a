//! textcast type system
//!
//! This crate defines the vocabulary shared by the other textcast crates:
//! - Primitive kinds (integers, floats, decimal, text, temporal, identifiers)
//! - Type descriptors and their text syntax
//! - Runtime values produced by coercion

pub mod descriptor;
pub mod primitive;
pub mod value;

pub use descriptor::*;
pub use primitive::*;
pub use value::*;
