//! Coercion engine
//!
//! Walks a [`TypeDescriptor`] and turns text into a [`Value`]:
//!
//! 1. no target yields no value
//! 2. surrounding whitespace is trimmed
//! 3. nullable targets map empty text to no value, otherwise unwrap
//! 4. arrays and lists split on `,` and coerce each token
//! 5. enums match member names
//! 6. everything else goes to the primitive parser table
//!
//! Malformed text is `Ok(None)`. The only error a well-formed call can
//! produce comes from building a list of an unsupported element type.

use crate::collections::CollectionFactoryCache;
use crate::error::CoerceResult;
use crate::options::CoercerOptions;
use crate::parsers::ParserTable;
use crate::tokenizer::split_sequence;
use std::sync::LazyLock;
use textcast_types::{EnumType, EnumValue, TypeDescriptor, Value};

static GLOBAL: LazyLock<Coercer> = LazyLock::new(Coercer::new);

/// Converts text to typed values
///
/// Owns its collection-factory cache; share one instance across threads
/// rather than creating one per call.
#[derive(Debug)]
pub struct Coercer {
    options: CoercerOptions,
    parsers: &'static ParserTable,
    factories: CollectionFactoryCache,
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new()
    }
}

impl Coercer {
    /// Create a coercer with default options
    pub fn new() -> Self {
        Self::with_options(CoercerOptions::default())
    }

    /// Create a coercer with the given options
    pub fn with_options(options: CoercerOptions) -> Self {
        Self {
            options,
            parsers: ParserTable::global(),
            factories: CollectionFactoryCache::new(),
        }
    }

    /// The process-wide coercer with default options
    pub fn global() -> &'static Coercer {
        &GLOBAL
    }

    /// Options in effect
    pub fn options(&self) -> &CoercerOptions {
        &self.options
    }

    /// Collection factories discovered so far
    pub fn factories(&self) -> &CollectionFactoryCache {
        &self.factories
    }

    /// Coerce `text` to `target`
    pub fn convert(&self, target: Option<&TypeDescriptor>, text: &str) -> CoerceResult<Option<Value>> {
        match target {
            Some(target) => self.coerce(target, text.trim()),
            None => Ok(None),
        }
    }

    fn coerce(&self, target: &TypeDescriptor, text: &str) -> CoerceResult<Option<Value>> {
        match target {
            TypeDescriptor::Nullable(inner) => {
                if text.is_empty() {
                    Ok(None)
                } else {
                    self.coerce(inner, text)
                }
            }
            TypeDescriptor::Array(element) => self.coerce_array(element, text),
            TypeDescriptor::List(element) => self.coerce_list(element, text),
            TypeDescriptor::Enum(enum_type) => Ok(coerce_enum(enum_type, text)),
            TypeDescriptor::Primitive(kind) => Ok(self.parsers.parse(*kind, text)),
            TypeDescriptor::Named { .. } | TypeDescriptor::Unsupported(_) => {
                log::trace!("no parser for {}", target);
                Ok(None)
            }
        }
    }

    fn coerce_array(&self, element: &TypeDescriptor, text: &str) -> CoerceResult<Option<Value>> {
        if !is_array_element(element) {
            log::debug!("cannot build an array of {}", element);
            return Ok(None);
        }

        let tokens = split_sequence(text, self.options.empty_sequence);
        let mut items = Vec::with_capacity(tokens.len());
        for token in tokens {
            items.push(self.coerce(element, token)?);
        }
        Ok(Some(Value::Array(items)))
    }

    fn coerce_list(&self, element: &TypeDescriptor, text: &str) -> CoerceResult<Option<Value>> {
        let factory = self.factories.factory_for(element)?;
        let tokens = split_sequence(text, self.options.empty_sequence);

        let mut list = factory.create(tokens.len());
        for token in tokens {
            list.push(self.coerce(element, token)?);
        }
        Ok(Some(Value::List(list)))
    }
}

/// Array elements must be scalar-like once nullability is peeled off
fn is_array_element(element: &TypeDescriptor) -> bool {
    match element {
        TypeDescriptor::Nullable(inner) => is_array_element(inner),
        TypeDescriptor::Array(_) | TypeDescriptor::List(_) | TypeDescriptor::Unsupported(_) => false,
        TypeDescriptor::Primitive(_) | TypeDescriptor::Enum(_) | TypeDescriptor::Named { .. } => true,
    }
}

fn coerce_enum(enum_type: &EnumType, text: &str) -> Option<Value> {
    let member = enum_type
        .member(text)
        .or_else(|| enum_type.member_ignore_case(text))?;
    Some(Value::Enum(EnumValue {
        type_name: enum_type.name.clone(),
        member: member.name.clone(),
        value: member.value,
    }))
}

/// Coerce `text` to `target` with the process-wide coercer
pub fn convert(target: Option<&TypeDescriptor>, text: &str) -> CoerceResult<Option<Value>> {
    Coercer::global().convert(target, text)
}
