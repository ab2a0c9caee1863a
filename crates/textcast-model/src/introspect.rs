//! Reflection-style queries over a metadata provider

use crate::provider::{MetadataProvider, ModelProviderError, ModelResult};
use indexmap::IndexSet;
use serde::Serialize;
use textcast_types::TypeDescriptor;

/// Static field whose declared type matched a requested element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticField {
    /// Field name
    pub name: String,
    /// Declared field type
    pub declared_type: TypeDescriptor,
    /// Initial value text, if declared
    pub value: Option<String>,
}

/// Check if a type is one of the built-in numeric kinds
pub fn is_numeric(ty: &TypeDescriptor) -> bool {
    ty.is_numeric()
}

/// List every interface `ty` implements, transitively
///
/// When `ty` is itself an interface it is listed first. Interfaces inherited
/// through base types and interface extension are included once each, in
/// discovery order.
pub fn list_interfaces(
    provider: &dyn MetadataProvider,
    ty: &TypeDescriptor,
) -> ModelResult<Vec<TypeDescriptor>> {
    let key = ty.model_key().ok_or_else(|| {
        ModelProviderError::InvalidArgument(format!("{} is not a model type", ty))
    })?;
    let root = provider
        .get_type(&key)
        .ok_or_else(|| ModelProviderError::TypeNotFound(key.clone()))?;

    let mut interfaces = IndexSet::new();
    if root.is_interface() {
        interfaces.insert(root.qualified_name());
    }

    let mut pending = vec![root];
    let mut visited = IndexSet::new();
    while let Some(current) = pending.pop() {
        if !visited.insert(current.qualified_name()) {
            continue;
        }

        for name in &current.interfaces {
            match provider.get_type(name) {
                Some(interface) => {
                    interfaces.insert(interface.qualified_name());
                    pending.push(interface);
                }
                None => {
                    log::trace!("interface {} of {} is not in the model", name, current.name);
                    interfaces.insert(name.clone());
                }
            }
        }

        if let Some(base) = current.base_type.as_deref().and_then(|b| provider.get_type(b)) {
            pending.push(base);
        }
    }

    Ok(interfaces
        .into_iter()
        .map(|name| TypeDescriptor::qualified(&name))
        .collect())
}

/// Collect the static fields of `container` whose declared type is assignable to `element`
///
/// Only fields declared on `container` itself are considered; statics of
/// base types are not flattened in.
pub fn collect_static_fields(
    provider: &dyn MetadataProvider,
    container: &TypeDescriptor,
    element: &TypeDescriptor,
) -> ModelResult<Vec<StaticField>> {
    let key = container.model_key().ok_or_else(|| {
        ModelProviderError::InvalidArgument(format!("{} is not a model type", container))
    })?;
    let type_info = provider
        .get_type(&key)
        .ok_or_else(|| ModelProviderError::TypeNotFound(key.clone()))?;

    let mut fields = Vec::new();
    for field in type_info.static_elements() {
        let declared_type =
            TypeDescriptor::parse_with(&field.element_type, |name| provider.resolve_name(name))
                .map_err(|e| ModelProviderError::InvalidDescriptor {
                    text: field.element_type.clone(),
                    message: e.to_string(),
                })?;

        if is_assignable(provider, &declared_type, element) {
            fields.push(StaticField {
                name: field.name.clone(),
                declared_type,
                value: field.value.clone(),
            });
        }
    }

    log::debug!(
        "{} of {} static fields on {} match {}",
        fields.len(),
        type_info.static_elements().count(),
        key,
        element
    );
    Ok(fields)
}

/// Assignability including nominal subtyping from the model
fn is_assignable(
    provider: &dyn MetadataProvider,
    from: &TypeDescriptor,
    to: &TypeDescriptor,
) -> bool {
    if from.is_assignable_to(to) {
        return true;
    }

    match (from, to) {
        (_, TypeDescriptor::Nullable(inner)) if !from.is_nullable() => {
            is_assignable(provider, from, inner)
        }
        (TypeDescriptor::Array(a), TypeDescriptor::Array(b))
        | (TypeDescriptor::List(a), TypeDescriptor::List(b)) => is_assignable(provider, a, b),
        _ => match (from.model_key(), to.model_key()) {
            (Some(child), Some(parent)) => provider.is_derived_from(&child, &parent),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ModelRegistry;
    use textcast_types::PrimitiveKind;

    fn registry() -> ModelRegistry {
        ModelRegistry::from_json(
            r#"{
            "name": "Shapes",
            "typeInfo": [
                {"name": "IShape", "kind": "interface"},
                {"name": "IPolygon", "kind": "interface", "interface": ["IShape"]},
                {"name": "Square", "interface": ["IPolygon"]},
                {"name": "Tile", "baseType": "Square", "interface": ["IComparable"]},
                {"name": "Palette", "element": [
                    {"name": "Unit", "type": "Square", "static": true},
                    {"name": "Floor", "type": "Tile", "static": true},
                    {"name": "Count", "type": "Int32", "static": true, "value": "4"},
                    {"name": "Limit", "type": "Int32?", "static": true},
                    {"name": "Name", "type": "String"}
                ]}
            ]
        }"#,
        )
        .unwrap()
    }

    fn names(types: &[TypeDescriptor]) -> Vec<String> {
        types.iter().map(|t| t.qualified_name()).collect()
    }

    #[test]
    fn test_interfaces_of_interface_include_self() {
        let registry = registry();
        let result = list_interfaces(&registry, &TypeDescriptor::named("IPolygon")).unwrap();
        assert_eq!(names(&result), vec!["IPolygon", "IShape"]);
    }

    #[test]
    fn test_interfaces_are_transitive() {
        let registry = registry();
        let result = list_interfaces(&registry, &TypeDescriptor::named("Tile")).unwrap();
        assert_eq!(names(&result), vec!["IComparable", "IPolygon", "IShape"]);
    }

    #[test]
    fn test_interfaces_of_unknown_type() {
        let registry = registry();
        assert!(matches!(
            list_interfaces(&registry, &TypeDescriptor::named("Circle")),
            Err(ModelProviderError::TypeNotFound(_))
        ));
        assert!(matches!(
            list_interfaces(&registry, &PrimitiveKind::Int32.into()),
            Err(ModelProviderError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_static_fields_by_nominal_type() {
        let registry = registry();
        let palette = TypeDescriptor::named("Palette");

        let squares =
            collect_static_fields(&registry, &palette, &TypeDescriptor::named("Square")).unwrap();
        let found: Vec<_> = squares.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(found, vec!["Unit", "Floor"]);

        let shapes =
            collect_static_fields(&registry, &palette, &TypeDescriptor::named("IShape")).unwrap();
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn test_static_fields_by_primitive_type() {
        let registry = registry();
        let palette = TypeDescriptor::named("Palette");

        let ints = collect_static_fields(&registry, &palette, &PrimitiveKind::Int32.into()).unwrap();
        assert_eq!(ints.len(), 1);
        assert_eq!(ints[0].value.as_deref(), Some("4"));

        let nullable_ints = collect_static_fields(
            &registry,
            &palette,
            &TypeDescriptor::nullable(PrimitiveKind::Int32.into()),
        )
        .unwrap();
        let found: Vec<_> = nullable_ints.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(found, vec!["Count", "Limit"]);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(&PrimitiveKind::Float64.into()));
        assert!(!is_numeric(&TypeDescriptor::named("Square")));
    }
}
