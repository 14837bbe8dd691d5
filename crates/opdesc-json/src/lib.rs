//! JSON conversions for opdesc-core types.
//!
//! This crate provides conversions between JSON and the opdesc-core value
//! types.
//!
//! # Modules
//!
//! - [`forward`] - TypedValue → JSON value conversion
//! - [`reverse`] - JSON value → DynamicValue / OperationDescriptor conversion
//!
//! # Example
//!
//! ```ignore
//! use opdesc_json::{descriptor_from_str, JsonValue};
//! use opdesc_core::TypedValue;
//!
//! // Reverse: JSON text → OperationDescriptor
//! let descriptor = descriptor_from_str(r#"{"op": 1001, "bin": "tags", "val": 1}"#).unwrap();
//!
//! // Forward: TypedValue → JSON value
//! let json_val: JsonValue = TypedValue::integer(1).into();
//! ```

pub mod forward;
pub mod reverse;

pub use forward::JsonValue;
pub use reverse::{descriptor_from_json, descriptor_from_str, json_to_dynamic, JsonDescriptorError};
