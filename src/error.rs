//! Error types for field coercion.

use std::fmt;

/// Why a field could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field was absent
    MissingField,
    /// The value present is not convertible to the requested type
    TypeMismatch,
    /// A numeric value exceeds the target width
    Overflow,
    /// The conversion mechanism failed for a reason other than overflow
    ConversionFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingField => "missing field",
            Self::TypeMismatch => "type mismatch",
            Self::Overflow => "overflow",
            Self::ConversionFailure => "conversion failure",
        };
        f.write_str(name)
    }
}

/// Failure to extract a typed field from an operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    kind: ErrorKind,
    message: String,
}

/// Outcome of every extraction function.
pub type CoercionResult<T> = Result<T, CoercionError>;

impl CoercionError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingField, message)
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Overflow, message)
    }

    pub fn conversion_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConversionFailure, message)
    }

    /// Error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with the field it was raised for.
    pub fn in_field(self, field: &str) -> Self {
        Self {
            kind: self.kind,
            message: format!("{field}: {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_message() {
        let err = CoercionError::overflow("count too large");
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(err.to_string(), "count too large");
    }

    #[test]
    fn test_in_field_keeps_kind() {
        let err = CoercionError::type_mismatch("no serializer for float").in_field("val");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.message(), "val: no serializer for float");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::MissingField.to_string(), "missing field");
        assert_eq!(ErrorKind::ConversionFailure.to_string(), "conversion failure");
    }
}
