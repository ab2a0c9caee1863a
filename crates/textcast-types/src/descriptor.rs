//! Runtime type descriptors
//!
//! This module defines the closed set of shapes a coercion target can take:
//! - Primitive scalars
//! - Nullable wrappers, fixed-length arrays and growable lists
//! - Enumerations with their member tables
//! - Named (struct-like or interface) types known only by name
//!
//! Descriptors are compared and hashed structurally, so two independently
//! built `List<Int32>` descriptors are interchangeable as cache keys.

use crate::primitive::PrimitiveKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shape of a coercion target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Built-in scalar
    Primitive(PrimitiveKind),
    /// Values of the inner type, or absent
    Nullable(Box<TypeDescriptor>),
    /// Fixed-length array of the element type
    Array(Box<TypeDescriptor>),
    /// Growable homogeneous list of the element type
    List(Box<TypeDescriptor>),
    /// Enumeration with named members
    Enum(EnumType),
    /// Named type (class, struct or interface) resolved through a model
    Named {
        /// Optional namespace (e.g., "Acme.Billing")
        namespace: Option<String>,
        /// Type name
        name: String,
    },
    /// A type the engine has no coercion rule for
    Unsupported(String),
}

impl TypeDescriptor {
    // === Constructors ===

    /// Create a primitive descriptor
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    /// Create a nullable wrapper
    pub fn nullable(inner: TypeDescriptor) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Create an array descriptor
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// Create a list descriptor
    pub fn list(element: TypeDescriptor) -> Self {
        Self::List(Box::new(element))
    }

    /// Create an enum descriptor
    pub fn enumeration(enum_type: EnumType) -> Self {
        Self::Enum(enum_type)
    }

    /// Create a named type without namespace
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a named type, splitting a dotted name into namespace and name
    pub fn qualified(qualified_name: &str) -> Self {
        match qualified_name.rsplit_once('.') {
            Some((namespace, name)) => Self::Named {
                namespace: Some(namespace.to_string()),
                name: name.to_string(),
            },
            None => Self::named(qualified_name),
        }
    }

    // === Type Properties ===

    /// Check if this is a numeric primitive
    ///
    /// Only bare primitives classify; `Int32?` is a wrapper, not a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Primitive(kind) if kind.is_numeric())
    }

    /// Check if this is a primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Check if this is a nullable wrapper
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Check if this is an array or list
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Array(_) | Self::List(_))
    }

    /// Get the primitive kind, if any
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Get the element type for array and list types
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Array(elem) | Self::List(elem) => Some(elem),
            _ => None,
        }
    }

    /// Get the wrapped type for nullable types
    pub fn underlying(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Get the enum definition for enum types
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Get the simple name of this type
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.name(),
            Self::Nullable(_) => "Nullable",
            Self::Array(_) => "Array",
            Self::List(_) => "List",
            Self::Enum(e) => &e.name,
            Self::Named { name, .. } => name,
            Self::Unsupported(name) => name,
        }
    }

    /// Get the fully qualified name of this type
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.qualified_name().to_string(),
            Self::Nullable(inner) => format!("Nullable<{}>", inner.qualified_name()),
            Self::Array(elem) => format!("Array<{}>", elem.qualified_name()),
            Self::List(elem) => format!("List<{}>", elem.qualified_name()),
            Self::Enum(e) => e.name.clone(),
            Self::Named { namespace, name } => match namespace {
                Some(ns) => format!("{}.{}", ns, name),
                None => name.clone(),
            },
            Self::Unsupported(name) => name.clone(),
        }
    }

    /// Key used to look the type up in a model (`namespace.name` or `name`)
    pub fn model_key(&self) -> Option<String> {
        match self {
            Self::Enum(e) => Some(e.name.clone()),
            Self::Named { .. } => Some(self.qualified_name()),
            _ => None,
        }
    }

    // === Type Relationships ===

    /// Structural assignability without model knowledge
    ///
    /// - identical descriptors are assignable
    /// - `T` is assignable to `T?`
    /// - arrays and lists are covariant in their element type
    pub fn is_assignable_to(&self, target: &TypeDescriptor) -> bool {
        if self == target {
            return true;
        }

        match (self, target) {
            (_, Self::Nullable(inner)) if !self.is_nullable() => self.is_assignable_to(inner),
            (Self::Array(a), Self::Array(b)) | (Self::List(a), Self::List(b)) => {
                a.is_assignable_to(b)
            }
            _ => false,
        }
    }

    // === Text Syntax ===

    /// Parse descriptor syntax, resolving non-primitive names through `resolve`
    ///
    /// Names `resolve` does not recognise become [`TypeDescriptor::Named`].
    pub fn parse_with<F>(input: &str, resolve: F) -> Result<Self, DescriptorParseError>
    where
        F: Fn(&str) -> Option<TypeDescriptor>,
    {
        let mut parser = DescriptorParser {
            input,
            pos: 0,
            resolve: &resolve,
        };
        parser.skip_ws();
        if parser.at_end() {
            return Err(DescriptorParseError::Empty);
        }
        let ty = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some(found) => Err(DescriptorParseError::Unexpected {
                position: parser.pos,
                found,
            }),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{}", kind),
            Self::Nullable(inner) => write!(f, "{}?", inner),
            Self::Array(elem) => write!(f, "{}[]", elem),
            Self::List(elem) => write!(f, "List<{}>", elem),
            Self::Enum(e) => write!(f, "{}", e.name),
            Self::Named { .. } | Self::Unsupported(_) => write!(f, "{}", self.qualified_name()),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, |_| None)
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

/// Enumeration definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumType {
    /// Enum type name
    pub name: String,
    /// Members in declaration order
    pub members: Vec<EnumMember>,
}

impl EnumType {
    /// Create an enum whose members take their declaration index as value
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .enumerate()
            .map(|(i, name)| EnumMember::new(name, i as i64))
            .collect();
        Self {
            name: name.into(),
            members,
        }
    }

    /// Create an enum from explicit members
    pub fn with_members(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Find a member by name, ignoring case (Unicode lowercase folding)
    pub fn member_ignore_case(&self, name: &str) -> Option<&EnumMember> {
        let wanted = name.to_lowercase();
        self.members
            .iter()
            .find(|m| m.name.to_lowercase() == wanted)
    }

    /// Find a member by exact name
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Named enum member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name
    pub name: String,
    /// Underlying numeric value
    pub value: i64,
}

impl EnumMember {
    /// Create a new enum member
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Errors from parsing descriptor syntax
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorParseError {
    /// Input was empty or blank
    #[error("Empty type descriptor")]
    Empty,

    /// Input ended inside a descriptor
    #[error("Unexpected end of type descriptor, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A character that does not belong at this position
    #[error("Unexpected '{found}' at position {position}")]
    Unexpected { position: usize, found: char },
}

/// Recursive-descent parser for `Name`, `T?`, `T[]`, `List<T>`, `Array<T>`, `Nullable<T>`
struct DescriptorParser<'a, F> {
    input: &'a str,
    pos: usize,
    resolve: &'a F,
}

impl<'a, F> DescriptorParser<'a, F>
where
    F: Fn(&str) -> Option<TypeDescriptor>,
{
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), DescriptorParseError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(DescriptorParseError::Unexpected {
                position: self.pos,
                found,
            }),
            None => Err(DescriptorParseError::UnexpectedEnd { expected: what }),
        }
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, DescriptorParseError> {
        let mut ty = self.parse_base()?;

        loop {
            self.skip_ws();
            match self.peek() {
                Some('?') => {
                    self.bump();
                    ty = TypeDescriptor::nullable(ty);
                }
                Some('[') => {
                    self.bump();
                    self.expect(']', "']'")?;
                    ty = TypeDescriptor::array(ty);
                }
                _ => return Ok(ty),
            }
        }
    }

    fn parse_base(&mut self) -> Result<TypeDescriptor, DescriptorParseError> {
        self.skip_ws();
        let ident = self.parse_ident()?;

        self.skip_ws();
        if self.peek() == Some('<') {
            self.bump();
            let inner = self.parse_type()?;
            self.expect('>', "'>'")?;

            return match ident.to_ascii_lowercase().as_str() {
                "list" => Ok(TypeDescriptor::list(inner)),
                "array" => Ok(TypeDescriptor::array(inner)),
                "nullable" | "option" => Ok(TypeDescriptor::nullable(inner)),
                _ => Ok(TypeDescriptor::Unsupported(format!("{}<{}>", ident, inner))),
            };
        }

        if let Some(kind) = PrimitiveKind::from_name(ident) {
            return Ok(TypeDescriptor::Primitive(kind));
        }

        Ok((self.resolve)(ident).unwrap_or_else(|| TypeDescriptor::qualified(ident)))
    }

    fn parse_ident(&mut self) -> Result<&'a str, DescriptorParseError> {
        let input = self.input;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.bump();
        }

        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(DescriptorParseError::Unexpected {
                    position: self.pos,
                    found,
                }),
                None => Err(DescriptorParseError::UnexpectedEnd {
                    expected: "type name",
                }),
            };
        }

        Ok(&input[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_properties() {
        let int = TypeDescriptor::primitive(PrimitiveKind::Int32);
        assert!(int.is_numeric());
        assert!(int.is_primitive());
        assert!(!TypeDescriptor::nullable(int.clone()).is_numeric());
        assert!(TypeDescriptor::list(int.clone()).is_collection());
        assert_eq!(
            TypeDescriptor::array(int.clone()).element_type(),
            Some(&int)
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = TypeDescriptor::list(PrimitiveKind::Int32.into());
        let b: TypeDescriptor = "List<Int32>".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_qualified_name() {
        let ty = TypeDescriptor::list(TypeDescriptor::nullable(PrimitiveKind::Int64.into()));
        assert_eq!(ty.qualified_name(), "List<Nullable<System.Int64>>");
        assert_eq!(ty.to_string(), "List<Int64?>");
        assert_eq!(
            TypeDescriptor::qualified("Acme.Billing.Invoice").qualified_name(),
            "Acme.Billing.Invoice"
        );
    }

    #[test]
    fn test_assignability() {
        let int: TypeDescriptor = PrimitiveKind::Int32.into();
        assert!(int.is_assignable_to(&TypeDescriptor::nullable(int.clone())));
        assert!(!TypeDescriptor::nullable(int.clone()).is_assignable_to(&int));
        assert!(TypeDescriptor::list(int.clone())
            .is_assignable_to(&TypeDescriptor::list(TypeDescriptor::nullable(int.clone()))));
    }

    #[test]
    fn test_parse_with_resolver() {
        let color = EnumType::new("Color", ["Red", "Green"]);
        let resolved = TypeDescriptor::parse_with("Color[]", |name| {
            (name == "Color").then(|| TypeDescriptor::enumeration(color.clone()))
        })
        .unwrap();
        assert_eq!(resolved, TypeDescriptor::array(TypeDescriptor::Enum(color)));
    }
}
