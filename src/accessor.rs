//! Field lookup with presence classification.

use opdesc_core::{DynamicValue, OperationDescriptor};

/// Outcome of looking a key up in an operation descriptor.
///
/// A key holding an explicit null is distinct from a missing key; optional
/// fields need both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresenceState<'a> {
    /// No such key
    Absent,
    /// Key present, value is the null sentinel
    PresentNull,
    /// Key present with a non-null value
    PresentValue(&'a DynamicValue),
}

/// Look `key` up in `descriptor` and classify the result.
pub fn locate<'a>(descriptor: &'a OperationDescriptor, key: &str) -> PresenceState<'a> {
    match descriptor.get(key) {
        None => PresenceState::Absent,
        Some(DynamicValue::Null) => PresenceState::PresentNull,
        Some(value) => PresenceState::PresentValue(value),
    }
}
