//! Coercion errors
//!
//! Unparseable text is not an error: it is reported as `Ok(None)`. Only
//! invalid arguments and unsupported collection shapes surface here.

use thiserror::Error;

/// Result type for coercion operations
pub type CoerceResult<T> = Result<T, CoerceError>;

/// Errors that can occur during coercion and name resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// A required argument was absent or empty
    #[error("Invalid argument {argument}: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// No construction strategy exists for lists of this element type
    #[error("Cannot construct a list of {element_type}: {reason}")]
    UnsupportedElementType {
        element_type: String,
        reason: &'static str,
    },
}
