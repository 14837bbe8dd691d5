//! Dynamic value representation.
//!
//! `DynamicValue` is the loosely-typed form an operation descriptor carries.
//! It is a closed union: every coercion in the workspace pattern-matches on
//! it rather than inspecting types at runtime.

use std::fmt;

/// Loosely-typed value supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// Explicit null sentinel, distinct from a missing key
    Null,

    /// Fixed-width integer
    Integer(i64),

    /// Arbitrary-precision integer
    BigInteger(BigInteger),

    /// String-like value
    Text(TextValue),

    /// Ordered sequence of values
    Sequence(Vec<DynamicValue>),

    /// Value with no native typed form; encoded through a serializer policy
    Opaque(OpaqueValue),
}

impl DynamicValue {
    /// Create a UTF-8 text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextValue::Utf8(value.into()))
    }

    /// Create a UTF-16 text value from a string.
    pub fn utf16_text(value: &str) -> Self {
        Self::Text(TextValue::Utf16(value.encode_utf16().collect()))
    }

    /// Create a sequence value.
    pub fn sequence(values: impl IntoIterator<Item = DynamicValue>) -> Self {
        Self::Sequence(values.into_iter().collect())
    }

    /// Create an arbitrary-precision integer from its decimal digits.
    pub fn big_integer(digits: impl Into<String>) -> Self {
        Self::BigInteger(BigInteger::new(digits))
    }

    /// Check if this value is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a sequence.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::BigInteger(_) => "big integer",
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Opaque(opaque) => &opaque.type_name,
        }
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

/// String-like value in its native encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValue {
    /// UTF-8 text, readable in place
    Utf8(String),

    /// UTF-16 code units; reading requires a transcoding pass
    Utf16(Vec<u16>),
}

impl TextValue {
    /// Borrow the text when it is already UTF-8.
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s),
            Self::Utf16(_) => None,
        }
    }
}

/// Arbitrary-precision integer in its decimal representation.
///
/// The digits are kept exactly as supplied; validation happens when the
/// value is coerced, so a malformed representation surfaces as a
/// conversion failure instead of being rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    digits: String,
}

impl BigInteger {
    /// Create a big integer from a decimal string such as `"-170141183460469231731"`.
    pub fn new(digits: impl Into<String>) -> Self {
        Self {
            digits: digits.into(),
        }
    }

    /// Decimal representation as supplied.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        Self::new(value.to_string())
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        Self::new(value.to_string())
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Value the built-in type mapping cannot represent natively.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueValue {
    /// Source type name, e.g. "float" or "map"
    pub type_name: String,

    /// Structured payload handed to serializers
    pub payload: serde_json::Value,
}

impl OpaqueValue {
    /// Create a new opaque value.
    pub fn new(type_name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dynamic_value_accessors() {
        assert!(DynamicValue::Null.is_null());
        assert!(!DynamicValue::Integer(0).is_null());

        let seq = DynamicValue::sequence([DynamicValue::Integer(1), DynamicValue::Null]);
        assert_eq!(seq.as_sequence().map(<[_]>::len), Some(2));
        assert_eq!(DynamicValue::text("x").as_sequence(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(DynamicValue::Null.type_name(), "null");
        assert_eq!(DynamicValue::big_integer("1").type_name(), "big integer");
        let opaque = DynamicValue::Opaque(OpaqueValue::new("float", json!(1.5)));
        assert_eq!(opaque.type_name(), "float");
    }

    #[test]
    fn test_text_encodings() {
        let utf8 = TextValue::Utf8("bin".to_string());
        assert_eq!(utf8.as_utf8(), Some("bin"));

        let DynamicValue::Text(utf16) = DynamicValue::utf16_text("bin") else {
            panic!("expected text");
        };
        assert_eq!(utf16.as_utf8(), None);
        assert_eq!(utf16, TextValue::Utf16(vec![0x62, 0x69, 0x6e]));
    }

    #[test]
    fn test_big_integer_keeps_digits() {
        let big = BigInteger::from(i128::from(i64::MAX) + 1);
        assert_eq!(big.as_str(), "9223372036854775808");
        assert_eq!(BigInteger::from(u64::MAX).to_string(), "18446744073709551615");
    }
}
