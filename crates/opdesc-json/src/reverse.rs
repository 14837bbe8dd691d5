//! Reverse conversion: JSON value → DynamicValue.
//!
//! JSON has no notion of the typed form, so every JSON value maps onto the
//! closed [`DynamicValue`] union:
//!
//! - integers that fit 64 bits become `Integer`, longer integer literals
//!   become `BigInteger` with their digits preserved
//! - booleans become `Integer` 1/0
//! - floats and objects become `Opaque` and are left to the serializer policy

use opdesc_core::{DynamicValue, OpaqueValue, OperationDescriptor};

/// Error type for descriptor parsing.
#[derive(Debug, thiserror::Error)]
pub enum JsonDescriptorError {
    /// Input was not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Top level of a descriptor must be an object
    #[error("Operation descriptor must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Convert a JSON value to a DynamicValue.
pub fn json_to_dynamic(value: &serde_json::Value) -> DynamicValue {
    match value {
        serde_json::Value::Null => DynamicValue::Null,
        serde_json::Value::Bool(b) => DynamicValue::Integer(i64::from(*b)),
        serde_json::Value::Number(n) => number_to_dynamic(n),
        serde_json::Value::String(s) => DynamicValue::text(s.clone()),
        serde_json::Value::Array(arr) => {
            DynamicValue::Sequence(arr.iter().map(json_to_dynamic).collect())
        }
        serde_json::Value::Object(_) => {
            DynamicValue::Opaque(OpaqueValue::new("map", value.clone()))
        }
    }
}

fn number_to_dynamic(n: &serde_json::Number) -> DynamicValue {
    if let Some(i) = n.as_i64() {
        return DynamicValue::Integer(i);
    }
    let literal = n.to_string();
    if literal.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        DynamicValue::Opaque(OpaqueValue::new(
            "float",
            serde_json::Value::Number(n.clone()),
        ))
    } else {
        DynamicValue::big_integer(literal)
    }
}

/// Convert a JSON object into an operation descriptor.
pub fn descriptor_from_json(
    value: &serde_json::Value,
) -> Result<OperationDescriptor, JsonDescriptorError> {
    match value {
        serde_json::Value::Object(obj) => Ok(obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_dynamic(val)))
            .collect()),
        other => Err(JsonDescriptorError::NotAnObject(json_type_name(other))),
    }
}

/// Parse JSON text into an operation descriptor.
pub fn descriptor_from_str(input: &str) -> Result<OperationDescriptor, JsonDescriptorError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    descriptor_from_json(&value)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
