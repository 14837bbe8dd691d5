//! Numeric coercion into 64-bit signed integers.

use crate::error::{CoercionError, CoercionResult};
use opdesc_core::{BigInteger, DynamicValue};
use std::num::IntErrorKind;

/// Coerce a dynamic value into an `i64`.
///
/// Both fixed-width and arbitrary-precision integers are accepted; `field`
/// names the descriptor entry in error messages. Every other variant,
/// including null, is a type mismatch.
pub fn coerce_i64(value: &DynamicValue, field: &str) -> CoercionResult<i64> {
    match value {
        DynamicValue::Integer(i) => Ok(*i),
        DynamicValue::BigInteger(big) => big_integer_to_i64(big, field),
        _ => Err(CoercionError::type_mismatch(format!(
            "{field} must be an integer"
        ))),
    }
}

fn big_integer_to_i64(big: &BigInteger, field: &str) -> CoercionResult<i64> {
    big.as_str().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoercionError::overflow(format!("{field} too large"))
        }
        _ => CoercionError::conversion_failure(format!("Failed to convert {field}")),
    })
}
