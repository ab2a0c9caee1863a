//! Collection constructor cache
//!
//! Discovers, once per element descriptor, how a growable list of that
//! element is built, and hands the cached strategy out on later calls.

use crate::error::{CoerceError, CoerceResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use textcast_types::{TypeDescriptor, ValueList};

/// Construction strategy for lists of one element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementFactory {
    /// Pre-sizes the list to the requested capacity
    WithCapacity(TypeDescriptor),
    /// Builds an empty list; the capacity hint is ignored
    Default(TypeDescriptor),
}

impl ElementFactory {
    /// Work out the strategy for `element`
    pub fn discover(element: &TypeDescriptor) -> CoerceResult<Self> {
        match element {
            TypeDescriptor::Primitive(_) | TypeDescriptor::Enum(_) => {
                Ok(Self::WithCapacity(element.clone()))
            }
            TypeDescriptor::Nullable(inner) => match Self::discover(inner)? {
                Self::WithCapacity(_) => Ok(Self::WithCapacity(element.clone())),
                Self::Default(_) => Ok(Self::Default(element.clone())),
            },
            TypeDescriptor::Named { .. } => Ok(Self::Default(element.clone())),
            TypeDescriptor::Array(_) | TypeDescriptor::List(_) => {
                Err(CoerceError::UnsupportedElementType {
                    element_type: element.to_string(),
                    reason: "nested collections are not supported",
                })
            }
            TypeDescriptor::Unsupported(_) => Err(CoerceError::UnsupportedElementType {
                element_type: element.to_string(),
                reason: "no constructor is known for this type",
            }),
        }
    }

    /// Element type of the lists this factory builds
    pub fn element_type(&self) -> &TypeDescriptor {
        match self {
            Self::WithCapacity(element) | Self::Default(element) => element,
        }
    }

    /// Build an empty list
    pub fn create(&self, capacity: usize) -> ValueList {
        match self {
            Self::WithCapacity(element) => ValueList::with_capacity(element.clone(), capacity),
            Self::Default(element) => ValueList::new(element.clone()),
        }
    }
}

/// Memoizes [`ElementFactory::discover`] per element descriptor
#[derive(Debug, Default)]
pub struct CollectionFactoryCache {
    factories: RwLock<HashMap<TypeDescriptor, Arc<ElementFactory>>>,
}

impl CollectionFactoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the factory for `element`, discovering it on first use
    ///
    /// Discovery failures are not cached.
    pub fn factory_for(&self, element: &TypeDescriptor) -> CoerceResult<Arc<ElementFactory>> {
        if let Some(factory) = self.factories.read().get(element) {
            return Ok(Arc::clone(factory));
        }

        let discovered = Arc::new(ElementFactory::discover(element)?);
        log::debug!("discovered list factory for {}: {:?}", element, discovered);

        // Racing discoveries agree; first insert wins
        let mut factories = self.factories.write();
        let factory = factories
            .entry(element.clone())
            .or_insert(discovered);
        Ok(Arc::clone(factory))
    }

    /// Number of cached factories
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// Check if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcast_types::{EnumType, PrimitiveKind};

    #[test]
    fn test_primitive_and_enum_use_capacity() {
        let int = TypeDescriptor::from(PrimitiveKind::Int32);
        let factory = ElementFactory::discover(&int).unwrap();
        assert_eq!(factory, ElementFactory::WithCapacity(int.clone()));
        assert!(factory.create(8).capacity() >= 8);

        let color = TypeDescriptor::enumeration(EnumType::new("Color", ["Red", "Green"]));
        assert!(matches!(
            ElementFactory::discover(&TypeDescriptor::nullable(color)).unwrap(),
            ElementFactory::WithCapacity(_)
        ));
    }

    #[test]
    fn test_named_uses_default() {
        let point = TypeDescriptor::named("Point");
        let factory = ElementFactory::discover(&point).unwrap();
        assert_eq!(factory, ElementFactory::Default(point));
        assert_eq!(factory.create(16).capacity(), 0);
    }

    #[test]
    fn test_unsupported_elements() {
        let nested = TypeDescriptor::list(PrimitiveKind::Int32.into());
        assert!(matches!(
            ElementFactory::discover(&nested),
            Err(CoerceError::UnsupportedElementType { .. })
        ));
        assert!(matches!(
            ElementFactory::discover(&TypeDescriptor::Unsupported("Map<String>".into())),
            Err(CoerceError::UnsupportedElementType { .. })
        ));
    }

    #[test]
    fn test_cache_reuses_factory() {
        let cache = CollectionFactoryCache::new();
        let element = TypeDescriptor::from(PrimitiveKind::String);

        let first = cache.factory_for(&element).unwrap();
        let second = cache.factory_for(&element).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        assert!(cache.factory_for(&TypeDescriptor::Unsupported("X".into())).is_err());
        assert_eq!(cache.len(), 1);
    }
}
