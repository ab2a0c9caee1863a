//! CLI functionality for the textcast tool
//!
//! This module contains all CLI-related functionality including:
//! - Value conversion
//! - Serialized-name lookup
//! - Type inspection
//! - Model loading
//! - Output formatting

pub mod convert;
pub mod inspect;
pub mod model;
pub mod name;
pub mod output;
