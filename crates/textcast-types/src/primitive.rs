//! Built-in scalar kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in scalar type kinds understood by the coercion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Unicode text
    String,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Arbitrary precision decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Date and time of day, with optional UTC offset
    DateTime,
    /// Calendar date
    DateOnly,
    /// Time of day
    TimeOnly,
    /// Signed time interval
    TimeSpan,
    /// 128-bit unique identifier
    Guid,
    /// Absolute or relative URI reference
    Uri,
    /// Single Unicode scalar value
    Char,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order
    pub const ALL: [PrimitiveKind; 20] = [
        Self::String,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::Decimal,
        Self::Boolean,
        Self::DateTime,
        Self::DateOnly,
        Self::TimeOnly,
        Self::TimeSpan,
        Self::Guid,
        Self::Uri,
        Self::Char,
    ];

    /// Get the simple name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Decimal => "Decimal",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::DateOnly => "DateOnly",
            Self::TimeOnly => "TimeOnly",
            Self::TimeSpan => "TimeSpan",
            Self::Guid => "Guid",
            Self::Uri => "Uri",
            Self::Char => "Char",
        }
    }

    /// Get the full qualified name
    pub const fn qualified_name(&self) -> &'static str {
        match self {
            Self::String => "System.String",
            Self::Int8 => "System.Int8",
            Self::Int16 => "System.Int16",
            Self::Int32 => "System.Int32",
            Self::Int64 => "System.Int64",
            Self::UInt8 => "System.UInt8",
            Self::UInt16 => "System.UInt16",
            Self::UInt32 => "System.UInt32",
            Self::UInt64 => "System.UInt64",
            Self::Float32 => "System.Float32",
            Self::Float64 => "System.Float64",
            Self::Decimal => "System.Decimal",
            Self::Boolean => "System.Boolean",
            Self::DateTime => "System.DateTime",
            Self::DateOnly => "System.DateOnly",
            Self::TimeOnly => "System.TimeOnly",
            Self::TimeSpan => "System.TimeSpan",
            Self::Guid => "System.Guid",
            Self::Uri => "System.Uri",
            Self::Char => "System.Char",
        }
    }

    /// Look up a kind by name.
    ///
    /// Accepts the simple name, the `System.` qualified name and the common
    /// Rust spellings (`i32`, `f64`, `bool`, ...), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name
            .strip_prefix("System.")
            .or_else(|| name.strip_prefix("system."))
            .unwrap_or(name);

        let kind = match name.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Self::String,
            "int8" | "i8" | "sbyte" => Self::Int8,
            "int16" | "i16" | "short" => Self::Int16,
            "int32" | "i32" | "int" | "integer" => Self::Int32,
            "int64" | "i64" | "long" => Self::Int64,
            "uint8" | "u8" | "byte" => Self::UInt8,
            "uint16" | "u16" | "ushort" => Self::UInt16,
            "uint32" | "u32" | "uint" => Self::UInt32,
            "uint64" | "u64" | "ulong" => Self::UInt64,
            "float32" | "f32" | "single" | "float" => Self::Float32,
            "float64" | "f64" | "double" => Self::Float64,
            "decimal" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "datetime" => Self::DateTime,
            "dateonly" | "date" => Self::DateOnly,
            "timeonly" | "time" => Self::TimeOnly,
            "timespan" | "duration" => Self::TimeSpan,
            "guid" | "uuid" => Self::Guid,
            "uri" | "url" => Self::Uri,
            "char" => Self::Char,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this type is numeric
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64 | Self::Decimal)
    }

    /// Check if this type is an integer of any width or signedness
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Check if this type is temporal
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::DateTime | Self::DateOnly | Self::TimeOnly | Self::TimeSpan
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPrimitive(s.to_string()))
    }
}

/// Returned when a name does not denote a primitive kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown primitive type: {0}")]
pub struct UnknownPrimitive(pub String);
