//! Serialized-name cache
//!
//! Maps a (type, field) pair to the name the field carries on the wire,
//! consulting an [`AnnotationReader`] once per pair.

use crate::error::{CoerceError, CoerceResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use textcast_model::AnnotationReader;
use textcast_types::TypeDescriptor;

type NameKey = (TypeDescriptor, String);

/// Memoized serialized-name lookup
#[derive(Debug)]
pub struct NameCache<R> {
    reader: R,
    names: RwLock<HashMap<NameKey, String>>,
}

impl<R: AnnotationReader> NameCache<R> {
    /// Create a cache over `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            names: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying annotation reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Serialized name of `field` on `ty`, or `field` itself when unannotated
    pub fn resolve(&self, ty: &TypeDescriptor, field: &str) -> CoerceResult<String> {
        if field.is_empty() {
            return Err(CoerceError::InvalidArgument {
                argument: "field",
                message: "field name must not be empty".to_string(),
            });
        }

        let key = (ty.clone(), field.to_string());
        if let Some(name) = self.names.read().get(&key) {
            return Ok(name.clone());
        }

        let resolved = self
            .reader
            .serialized_name(ty, field)
            .unwrap_or_else(|| field.to_string());
        log::trace!("resolved {}.{} as {}", ty, field, resolved);

        let mut names = self.names.write();
        Ok(names.entry(key).or_insert(resolved).clone())
    }

    /// Number of cached pairs
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Check if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lowercase;

    impl AnnotationReader for Lowercase {
        fn serialized_name(&self, _ty: &TypeDescriptor, field: &str) -> Option<String> {
            (field != "Raw").then(|| field.to_lowercase())
        }
    }

    #[test]
    fn test_resolve_uses_annotation() {
        let cache = NameCache::new(Lowercase);
        let ty = TypeDescriptor::named("Order");
        assert_eq!(cache.resolve(&ty, "Total").unwrap(), "total");
        assert_eq!(cache.resolve(&ty, "Raw").unwrap(), "Raw");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let cache = NameCache::new(Lowercase);
        assert!(matches!(
            cache.resolve(&TypeDescriptor::named("Order"), ""),
            Err(CoerceError::InvalidArgument { argument: "field", .. })
        ));
        assert!(cache.is_empty());
    }
}
