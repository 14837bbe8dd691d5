//! Forward conversion: TypedValue → JSON value.
//!
//! Blobs have no JSON counterpart, so they are written as an object naming
//! the encoding alongside the base64 bytes: `{"blob": "json", "base64": "..."}`.

use base64::Engine;
use opdesc_core::TypedValue;
use serde_json::json;

/// Wrapper for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<TypedValue> for JsonValue {
    fn from(tv: TypedValue) -> Self {
        JsonValue::from(&tv)
    }
}

impl From<&TypedValue> for JsonValue {
    fn from(tv: &TypedValue) -> Self {
        match tv {
            TypedValue::Nil => JsonValue(serde_json::Value::Null),
            TypedValue::Integer(i) => JsonValue(json!(*i)),
            TypedValue::Text(s) => JsonValue(json!(s)),
            TypedValue::Blob { kind, bytes } => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                JsonValue(json!({ "blob": kind.to_string(), "base64": encoded }))
            }
            TypedValue::List(values) => JsonValue(serde_json::Value::Array(
                values.iter().map(|v| JsonValue::from(v).into_inner()).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opdesc_core::BlobKind;

    #[test]
    fn test_nil_conversion() {
        let jv: JsonValue = TypedValue::Nil.into();
        assert_eq!(jv.into_inner(), serde_json::Value::Null);
    }

    #[test]
    fn test_scalar_conversion() {
        let jv: JsonValue = TypedValue::integer(-7).into();
        assert_eq!(jv.as_inner(), &json!(-7));

        let jv: JsonValue = TypedValue::text("tags").into();
        assert_eq!(jv.as_inner(), &json!("tags"));
    }

    #[test]
    fn test_blob_conversion() {
        let jv: JsonValue = TypedValue::blob(BlobKind::Json, b"1.5".to_vec()).into();
        assert_eq!(jv.into_inner(), json!({"blob": "json", "base64": "MS41"}));
    }

    #[test]
    fn test_nested_list_conversion() {
        let tv = TypedValue::list(vec![
            TypedValue::integer(1),
            TypedValue::list(vec![TypedValue::text("a"), TypedValue::Nil]),
        ]);
        let jv: JsonValue = tv.into();
        assert_eq!(jv.into_inner(), json!([1, ["a", null]]));
    }
}
