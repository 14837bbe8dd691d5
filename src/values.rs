//! Typed value extraction from descriptor fields.

use crate::accessor::{locate, PresenceState};
use crate::convert::ValueConverter;
use crate::error::{CoercionError, CoercionResult};
use opdesc_core::{DynamicValue, OperationDescriptor, SerializerPolicy, TypedList, TypedValue};

static NULL: DynamicValue = DynamicValue::Null;

/// Field label carried by every list-value error, whatever key was read.
pub const LIST_FIELD_LABEL: &str = "values";

/// Extract `key` as a typed value.
///
/// An absent key is an error only when `required`. An explicit null on an
/// optional field also yields `None`, meaning "clear"; on a required field
/// the null goes to the converter like any other value.
pub fn extract_value<C: ValueConverter + ?Sized>(
    converter: &C,
    descriptor: &OperationDescriptor,
    key: &str,
    policy: &SerializerPolicy,
    required: bool,
) -> CoercionResult<Option<TypedValue>> {
    let value = match locate(descriptor, key) {
        PresenceState::Absent if required => {
            return Err(CoercionError::missing_field(format!(
                "Operation must contain a \"{key}\" entry"
            )));
        }
        PresenceState::Absent => return Ok(None),
        PresenceState::PresentNull if !required => return Ok(None),
        PresenceState::PresentNull => &NULL,
        PresenceState::PresentValue(value) => value,
    };
    converter
        .to_typed_value(value, policy)
        .map(Some)
        .map_err(|e| e.in_field(key))
}

/// Extract `key` as a typed list.
///
/// Errors name the field [`LIST_FIELD_LABEL`] rather than `key`.
pub fn extract_list_value<C: ValueConverter + ?Sized>(
    converter: &C,
    descriptor: &OperationDescriptor,
    key: &str,
    policy: &SerializerPolicy,
) -> CoercionResult<TypedList> {
    let value = match locate(descriptor, key) {
        PresenceState::Absent => {
            return Err(CoercionError::missing_field(format!(
                "Operation must contain a \"{LIST_FIELD_LABEL}\" entry"
            )));
        }
        PresenceState::PresentValue(value @ DynamicValue::Sequence(_)) => value,
        PresenceState::PresentNull | PresenceState::PresentValue(_) => {
            return Err(
                CoercionError::type_mismatch("Value must be a list").in_field(LIST_FIELD_LABEL),
            );
        }
    };
    converter
        .to_typed_list(value, policy)
        .map_err(|e| e.in_field(LIST_FIELD_LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::BuiltinConverter;
    use crate::error::ErrorKind;
    use std::cell::Cell;

    /// Counts delegations and answers with a fixed value.
    #[derive(Default)]
    struct CountingConverter {
        calls: Cell<usize>,
    }

    impl ValueConverter for CountingConverter {
        fn to_typed_value(
            &self,
            _value: &DynamicValue,
            _policy: &SerializerPolicy,
        ) -> CoercionResult<TypedValue> {
            self.calls.set(self.calls.get() + 1);
            Ok(TypedValue::text("converted"))
        }

        fn to_typed_list(
            &self,
            _value: &DynamicValue,
            _policy: &SerializerPolicy,
        ) -> CoercionResult<TypedList> {
            self.calls.set(self.calls.get() + 1);
            Err(CoercionError::conversion_failure("list conversion failed"))
        }
    }

    #[test]
    fn test_absent_optional_skips_converter() {
        let converter = CountingConverter::default();
        let descriptor = OperationDescriptor::new();
        let result = extract_value(&converter, &descriptor, "val", &SerializerPolicy::None, false);
        assert_eq!(result, Ok(None));
        assert_eq!(converter.calls.get(), 0);
    }

    #[test]
    fn test_absent_required_is_missing_field() {
        let descriptor = OperationDescriptor::new();
        let err = extract_value(&BuiltinConverter, &descriptor, "val", &SerializerPolicy::None, true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.message(), "Operation must contain a \"val\" entry");
    }

    #[test]
    fn test_null_optional_is_clear() {
        let converter = CountingConverter::default();
        let descriptor = OperationDescriptor::new().with("val", DynamicValue::Null);
        let result = extract_value(&converter, &descriptor, "val", &SerializerPolicy::None, false);
        assert_eq!(result, Ok(None));
        assert_eq!(converter.calls.get(), 0);
    }

    #[test]
    fn test_null_required_is_converted() {
        let descriptor = OperationDescriptor::new().with("val", DynamicValue::Null);
        let result =
            extract_value(&BuiltinConverter, &descriptor, "val", &SerializerPolicy::None, true);
        assert_eq!(result, Ok(Some(TypedValue::Nil)));
    }

    #[test]
    fn test_present_value_delegates() {
        let converter = CountingConverter::default();
        let descriptor = OperationDescriptor::new().with("val", 1_i64);
        let result = extract_value(&converter, &descriptor, "val", &SerializerPolicy::None, false);
        assert_eq!(result, Ok(Some(TypedValue::text("converted"))));
        assert_eq!(converter.calls.get(), 1);
    }

    #[test]
    fn test_converter_error_names_field() {
        let descriptor = OperationDescriptor::new().with("val", DynamicValue::big_integer("1e3"));
        let err = extract_value(&BuiltinConverter, &descriptor, "val", &SerializerPolicy::None, true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);
        assert_eq!(err.message(), "val: Failed to convert integer value");
    }

    #[test]
    fn test_list_checks_shape_before_delegating() {
        let converter = CountingConverter::default();
        let descriptor = OperationDescriptor::new()
            .with("items", 5_i64)
            .with("nulls", DynamicValue::Null);

        let err = extract_list_value(&converter, &descriptor, "missing", &SerializerPolicy::None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);

        for key in ["items", "nulls"] {
            let err = extract_list_value(&converter, &descriptor, key, &SerializerPolicy::None)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        }
        assert_eq!(converter.calls.get(), 0);
    }

    #[test]
    fn test_list_errors_use_fixed_label() {
        let converter = CountingConverter::default();
        let descriptor = OperationDescriptor::new().with("items", DynamicValue::Sequence(vec![]));
        let err = extract_list_value(&converter, &descriptor, "items", &SerializerPolicy::None)
            .unwrap_err();
        assert_eq!(err.message(), "values: list conversion failed");
        assert_eq!(converter.calls.get(), 1);
    }
}
