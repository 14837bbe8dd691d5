//! Typed value representation.
//!
//! `TypedValue` is the strictly-typed form produced from a [`DynamicValue`]
//! by the value-conversion service. Operations carry these values.
//!
//! [`DynamicValue`]: crate::DynamicValue

use std::fmt;

/// Ordered list of typed values.
pub type TypedList = Vec<TypedValue>;

/// Strictly-typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// Explicit nil
    Nil,

    /// 64-bit signed integer
    Integer(i64),

    /// UTF-8 string
    Text(String),

    /// Serialized bytes together with the encoding that produced them
    Blob { kind: BlobKind, bytes: Vec<u8> },

    /// Nested list
    List(TypedList),
}

impl TypedValue {
    /// Create an integer typed value.
    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Create a text typed value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a blob typed value.
    pub fn blob(kind: BlobKind, bytes: Vec<u8>) -> Self {
        Self::Blob { kind, bytes }
    }

    /// Create a list typed value.
    pub fn list(values: TypedList) -> Self {
        Self::List(values)
    }

    /// Check if this typed value is nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

/// Encoding used for a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    /// JSON-encoded payload
    Json,
    /// Bytes produced by a caller-supplied serializer
    User,
}

impl fmt::Display for BlobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::User => f.write_str("user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value_accessors() {
        assert_eq!(TypedValue::integer(42).as_i64(), Some(42));
        assert_eq!(TypedValue::text("a").as_str(), Some("a"));
        assert!(TypedValue::Nil.is_nil());
        assert_eq!(TypedValue::text("a").as_i64(), None);

        let list = TypedValue::list(vec![TypedValue::integer(1), TypedValue::Nil]);
        assert_eq!(list.as_list().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_blob_kind_display() {
        assert_eq!(BlobKind::Json.to_string(), "json");
        assert_eq!(BlobKind::User.to_string(), "user");
    }
}
