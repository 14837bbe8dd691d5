//! Operation descriptor.

use crate::dynamic::DynamicValue;
use std::collections::HashMap;

/// String-keyed mapping from field name to dynamic value describing one
/// operation.
///
/// The coercion layer only ever reads a descriptor; the caller owns it for
/// the duration of a construction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationDescriptor {
    fields: HashMap<String, DynamicValue>,
}

impl OperationDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: DynamicValue) -> Option<DynamicValue> {
        self.fields.insert(key.into(), value)
    }

    /// Get a field value by name.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.fields.get(key)
    }

    /// Check whether a key is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the descriptor has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, DynamicValue)> for OperationDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, DynamicValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
