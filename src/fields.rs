//! Field extraction contracts used by operation-construction call sites.
//!
//! Every function reads one field from an [`OperationDescriptor`] and
//! returns the first failure it meets; the caller is expected to abandon the
//! whole operation on error.
//!
//! The two optional-integer readers differ on explicit null:
//! [`get_optional_i64`] rejects it, [`get_optional_int_null_aware`] treats it
//! as absent. Call sites rely on both behaviors.

use crate::accessor::{locate, PresenceState};
use crate::convert::BuiltinConverter;
use crate::error::{CoercionError, CoercionResult};
use crate::numeric::coerce_i64;
use crate::registry::DeferredStringRegistry;
use crate::strings::{self, StrBuf};
use crate::values::{extract_list_value, extract_value};
use opdesc_core::{DynamicValue, OperationDescriptor, SerializerPolicy, TypedList, TypedValue};

/// Key every operation names its bin under.
pub const BIN_KEY: &str = "bin";

/// Read the bin name.
///
/// Transcoded names are registered in `registry`, so the returned buffer is
/// valid for the rest of the construction pass either way.
pub fn get_bin_name<'a>(
    descriptor: &'a OperationDescriptor,
    registry: &mut DeferredStringRegistry,
) -> CoercionResult<StrBuf<'a>> {
    let Some(value) = descriptor.get(BIN_KEY) else {
        return Err(CoercionError::missing_field(format!(
            "Operation must contain a \"{BIN_KEY}\" entry"
        )));
    };
    let extracted = strings::extract(value).map_err(|e| e.in_field(BIN_KEY))?;
    Ok(extracted.settle(registry))
}

/// Read `key` as a typed value; see [`extract_value`](crate::values::extract_value).
pub fn get_value(
    descriptor: &OperationDescriptor,
    key: &str,
    policy: &SerializerPolicy,
    required: bool,
) -> CoercionResult<Option<TypedValue>> {
    extract_value(&BuiltinConverter, descriptor, key, policy, required)
}

/// Read `key` as a typed list. Errors are reported against `"values"`.
pub fn get_list_value(
    descriptor: &OperationDescriptor,
    key: &str,
    policy: &SerializerPolicy,
) -> CoercionResult<TypedList> {
    extract_list_value(&BuiltinConverter, descriptor, key, policy)
}

/// Read a required 64-bit integer. Null is a type mismatch.
pub fn get_required_i64(descriptor: &OperationDescriptor, key: &str) -> CoercionResult<i64> {
    get_optional_i64(descriptor, key)?.ok_or_else(|| {
        CoercionError::missing_field(format!("Operation missing required entry {key}"))
    })
}

/// Read an optional 64-bit integer.
///
/// A missing key yields `None`; an explicit null is a type mismatch.
pub fn get_optional_i64(
    descriptor: &OperationDescriptor,
    key: &str,
) -> CoercionResult<Option<i64>> {
    match locate(descriptor, key) {
        PresenceState::Absent => Ok(None),
        PresenceState::PresentNull => coerce_i64(&DynamicValue::Null, key).map(Some),
        PresenceState::PresentValue(value) => coerce_i64(value, key).map(Some),
    }
}

/// Read a required integer narrowed to 32 bits.
///
/// The narrowing truncates; values outside the `i32` range are not rejected.
pub fn get_required_int(descriptor: &OperationDescriptor, key: &str) -> CoercionResult<i32> {
    get_required_i64(descriptor, key).map(|value| value as i32)
}

/// Read an optional integer narrowed to 32 bits, treating null as absent.
pub fn get_optional_int_null_aware(
    descriptor: &OperationDescriptor,
    key: &str,
) -> CoercionResult<Option<i32>> {
    match locate(descriptor, key) {
        PresenceState::Absent | PresenceState::PresentNull => Ok(None),
        PresenceState::PresentValue(value) => coerce_i64(value, key).map(|v| Some(v as i32)),
    }
}
