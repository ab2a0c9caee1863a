//! ModelInfo abstraction for type metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use textcast_types::EnumMember;

/// ModelInfo structure describing a set of named types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name (e.g., "Billing")
    pub name: String,
    /// Model version
    pub version: String,
    /// Model URL
    pub url: String,
    /// Type definitions keyed by qualified name, in declaration order
    pub type_infos: IndexMap<String, TypeInfo>,
}

impl ModelInfo {
    /// Create a new ModelInfo
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            url: String::new(),
            type_infos: IndexMap::new(),
        }
    }

    /// Add a type, keyed by its qualified name
    pub fn insert(&mut self, type_info: TypeInfo) {
        self.type_infos.insert(type_info.qualified_name(), type_info);
    }

    /// Get type info by qualified name, falling back to a unique simple-name match
    pub fn get_type(&self, name: &str) -> Option<&TypeInfo> {
        if let Some(type_info) = self.type_infos.get(name) {
            return Some(type_info);
        }

        let mut matches = self.type_infos.values().filter(|t| t.name == name);
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Check if model contains type
    pub fn has_type(&self, name: &str) -> bool {
        self.get_type(name).is_some()
    }

    /// Get element info, traversing base types if necessary
    ///
    /// Stops at the first base type already visited, so cyclic base-type
    /// chains end the walk instead of looping.
    pub fn get_element(&self, parent_type: &str, element_name: &str) -> Option<&ElementInfo> {
        let mut current_type = self.get_type(parent_type)?;
        let mut visited = Vec::new();

        loop {
            if let Some(elem) = current_type.get_element(element_name) {
                return Some(elem);
            }

            let key = current_type.qualified_name();
            if visited.contains(&key) {
                return None;
            }
            visited.push(key);

            match current_type.base_type {
                Some(ref base_type_name) => current_type = self.get_type(base_type_name)?,
                None => return None,
            }
        }
    }

    /// Check if one type derives from or implements another
    ///
    /// Walks the base-type chain and the interface graph.
    pub fn is_derived_from(&self, child_type: &str, parent_type: &str) -> bool {
        let Some(child) = self.get_type(child_type) else {
            return false;
        };
        let Some(parent) = self.get_type(parent_type) else {
            return false;
        };
        let target = parent.qualified_name();

        let mut pending = vec![child];
        let mut visited = Vec::new();
        while let Some(current) = pending.pop() {
            let key = current.qualified_name();
            if key == target {
                return true;
            }
            if visited.contains(&key) {
                continue;
            }
            visited.push(key);

            let supertypes = current.base_type.iter().chain(current.interfaces.iter());
            pending.extend(supertypes.filter_map(|name| self.get_type(name)));
        }

        false
    }
}

/// Kind of a named type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Reference type with fields
    #[default]
    Class,
    /// Value type with fields
    Struct,
    /// Interface
    Interface,
    /// Enumeration
    Enum,
}

impl TypeKind {
    /// Parse the `kind` attribute of a type definition
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }
}

/// Type information for a model type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Type name
    pub name: String,
    /// Namespace
    pub namespace: Option<String>,
    /// Class, struct, interface or enum
    pub kind: TypeKind,
    /// Base type name
    pub base_type: Option<String>,
    /// Directly implemented (or, for interfaces, extended) interfaces
    pub interfaces: Vec<String>,
    /// Field definitions
    pub elements: Vec<ElementInfo>,
    /// Enum members (only for `TypeKind::Enum`)
    pub members: Vec<EnumMember>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: TypeKind::Class,
            base_type: None,
            interfaces: Vec::new(),
            elements: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create an enum type info whose members take their declaration index as value
    pub fn enumeration<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut type_info = Self::new(name);
        type_info.kind = TypeKind::Enum;
        type_info.members = members
            .into_iter()
            .enumerate()
            .map(|(i, m)| EnumMember::new(m, i as i64))
            .collect();
        type_info
    }

    /// `namespace.name`, or `name` without namespace
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Check if this type is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Get element by name
    pub fn get_element(&self, name: &str) -> Option<&ElementInfo> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Static elements in declaration order
    pub fn static_elements(&self) -> impl Iterator<Item = &ElementInfo> {
        self.elements.iter().filter(|e| e.is_static)
    }
}

/// Field information within a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Field name
    pub name: String,
    /// Declared type in descriptor syntax (e.g., `List<Int32>`)
    pub element_type: String,
    /// Whether the field is static
    pub is_static: bool,
    /// Initial value text of a static field
    pub value: Option<String>,
    /// Serialization-time name override
    pub serialized_name: Option<String>,
}

impl ElementInfo {
    pub fn new(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            is_static: false,
            value: None,
            serialized_name: None,
        }
    }

    /// Create a static field with an initial value
    pub fn static_field(
        name: impl Into<String>,
        element_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            is_static: true,
            value: Some(value.into()),
            ..Self::new(name, element_type)
        }
    }

    /// Set the serialization-time name override
    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = Some(serialized_name.into());
        self
    }
}
