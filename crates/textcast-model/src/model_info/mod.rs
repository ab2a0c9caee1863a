//! ModelInfo abstraction for type metadata

pub mod parser;
pub mod types;

pub use parser::*;
pub use types::*;
