//! Value conversion service: DynamicValue → TypedValue.
//!
//! [`ValueConverter`] is the seam the value extractor delegates to.
//! [`BuiltinConverter`] maps the closed dynamic union onto typed values and
//! routes opaque values through the caller's [`SerializerPolicy`].

use crate::error::{CoercionError, CoercionResult};
use crate::numeric::coerce_i64;
use crate::strings::{self, ExtractedStr};
use opdesc_core::{BlobKind, DynamicValue, OpaqueValue, SerializerPolicy, TypedList, TypedValue};

/// Builds typed values from dynamic values.
pub trait ValueConverter {
    /// Convert any dynamic value.
    fn to_typed_value(
        &self,
        value: &DynamicValue,
        policy: &SerializerPolicy,
    ) -> CoercionResult<TypedValue>;

    /// Convert a dynamic sequence into a typed list.
    fn to_typed_list(
        &self,
        value: &DynamicValue,
        policy: &SerializerPolicy,
    ) -> CoercionResult<TypedList>;
}

/// Default conversion for every [`DynamicValue`] variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinConverter;

impl ValueConverter for BuiltinConverter {
    fn to_typed_value(
        &self,
        value: &DynamicValue,
        policy: &SerializerPolicy,
    ) -> CoercionResult<TypedValue> {
        match value {
            DynamicValue::Null => Ok(TypedValue::Nil),
            DynamicValue::Integer(i) => Ok(TypedValue::Integer(*i)),
            DynamicValue::BigInteger(_) => {
                coerce_i64(value, "integer value").map(TypedValue::Integer)
            }
            DynamicValue::Text(_) => match strings::extract(value)? {
                ExtractedStr::Borrowed(s) => Ok(TypedValue::text(s)),
                ExtractedStr::OwnedDeferred(s) => Ok(TypedValue::Text(s)),
            },
            DynamicValue::Sequence(_) => self.to_typed_list(value, policy).map(TypedValue::List),
            DynamicValue::Opaque(opaque) => serialize_opaque(opaque, policy),
        }
    }

    fn to_typed_list(
        &self,
        value: &DynamicValue,
        policy: &SerializerPolicy,
    ) -> CoercionResult<TypedList> {
        let Some(items) = value.as_sequence() else {
            return Err(CoercionError::type_mismatch("Value must be a list"));
        };
        items
            .iter()
            .map(|item| self.to_typed_value(item, policy))
            .collect()
    }
}

fn serialize_opaque(
    opaque: &OpaqueValue,
    policy: &SerializerPolicy,
) -> CoercionResult<TypedValue> {
    match policy {
        SerializerPolicy::None => Err(CoercionError::type_mismatch(format!(
            "Unable to serialize {} value without a serializer",
            opaque.type_name
        ))),
        SerializerPolicy::Json => serde_json::to_vec(&opaque.payload)
            .map(|bytes| TypedValue::blob(BlobKind::Json, bytes))
            .map_err(|e| {
                CoercionError::conversion_failure(format!(
                    "Failed to serialize {} value as JSON: {e}",
                    opaque.type_name
                ))
            }),
        SerializerPolicy::User(serializer) => serializer
            .serialize(opaque)
            .map(|bytes| TypedValue::blob(BlobKind::User, bytes))
            .map_err(|e| {
                CoercionError::conversion_failure(format!(
                    "User serializer failed for {} value: {e:#}",
                    opaque.type_name
                ))
            }),
    }
}
