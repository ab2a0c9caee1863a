//! Tests for serialized-name resolution

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use textcast_coerce::{CoerceError, NameCache};
use textcast_model::{AnnotationReader, ModelRegistry};
use textcast_types::TypeDescriptor;

#[derive(Default)]
struct CountingReader {
    calls: AtomicUsize,
}

impl CountingReader {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnnotationReader for CountingReader {
    fn serialized_name(&self, _ty: &TypeDescriptor, field: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        field.strip_prefix("Json").map(str::to_lowercase)
    }
}

#[test]
fn test_reader_consulted_once_per_pair() {
    let cache = NameCache::new(CountingReader::default());
    let ty = TypeDescriptor::named("Order");

    let first = cache.resolve(&ty, "JsonTotal").unwrap();
    let second = cache.resolve(&ty, "JsonTotal").unwrap();
    assert_eq!(first, "total");
    assert_eq!(first, second);
    assert_eq!(cache.reader().calls(), 1);
}

#[test]
fn test_unannotated_field_keeps_its_name() {
    let cache = NameCache::new(CountingReader::default());
    let ty = TypeDescriptor::named("Order");

    assert_eq!(cache.resolve(&ty, "Total").unwrap(), "Total");
    assert_eq!(cache.resolve(&ty, "Total").unwrap(), "Total");
    assert_eq!(cache.reader().calls(), 1);
}

#[test]
fn test_pairs_are_distinct_per_type() {
    let cache = NameCache::new(CountingReader::default());
    cache.resolve(&TypeDescriptor::named("Order"), "JsonId").unwrap();
    cache.resolve(&TypeDescriptor::named("Invoice"), "JsonId").unwrap();
    assert_eq!(cache.reader().calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_empty_field_name_fails() {
    let cache = NameCache::new(CountingReader::default());
    let err = cache.resolve(&TypeDescriptor::named("Order"), "").unwrap_err();
    assert!(matches!(err, CoerceError::InvalidArgument { argument: "field", .. }));
    assert_eq!(cache.reader().calls(), 0);
}

#[test]
fn test_concurrent_resolution_agrees() {
    let cache = NameCache::new(CountingReader::default());
    let ty = TypeDescriptor::named("Order");

    let names: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.resolve(&ty, "JsonCreatedAt").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(names.iter().all(|name| name == "createdat"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_resolution_through_model_registry() {
    let registry = ModelRegistry::from_json(
        r#"{
        "name": "Shop",
        "typeInfo": [
            {"name": "Entity", "namespace": "Shop", "element": [
                {"name": "Id", "type": "Guid", "serializedName": "id"}
            ]},
            {"name": "Order", "namespace": "Shop", "baseType": "Shop.Entity", "element": [
                {"name": "PlacedOn", "type": "DateOnly", "serializedName": "placed_on"},
                {"name": "Notes", "type": "String"}
            ]}
        ]
    }"#,
    )
    .unwrap();
    let order = registry.descriptor("Order").unwrap();
    let cache = NameCache::new(registry);

    assert_eq!(cache.resolve(&order, "PlacedOn").unwrap(), "placed_on");
    assert_eq!(cache.resolve(&order, "Id").unwrap(), "id");
    assert_eq!(cache.resolve(&order, "Notes").unwrap(), "Notes");
}
