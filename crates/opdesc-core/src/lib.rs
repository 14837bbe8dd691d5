//! Core types for the opdesc coercion layer.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//!
//! - [`DynamicValue`] - Loosely-typed value as supplied by a caller
//! - [`OperationDescriptor`] - String-keyed map of dynamic values describing one operation
//! - [`TypedValue`] - Strictly-typed value the rest of the system operates on
//! - [`SerializerPolicy`] - How values without a native typed form get encoded
//!
//! # Architecture
//!
//! ```text
//! opdesc-core (this crate)
//!    │
//!    ├─── opdesc-json   (JSON → DynamicValue, TypedValue → JSON)
//!    │
//!    └─── opdesc        (field coercion, operation builder, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use opdesc_core::{DynamicValue, OperationDescriptor};
//!
//! let descriptor = OperationDescriptor::new()
//!     .with("bin", DynamicValue::text("tags"))
//!     .with("index", DynamicValue::Integer(0));
//!
//! assert!(descriptor.contains_key("bin"));
//! assert_eq!(descriptor.get("index"), Some(&DynamicValue::Integer(0)));
//! ```

pub mod descriptor;
pub mod dynamic;
pub mod policy;
pub mod typed;

pub use descriptor::OperationDescriptor;
pub use dynamic::{BigInteger, DynamicValue, OpaqueValue, TextValue};
pub use policy::{OpaqueSerializer, SerializerPolicy};
pub use typed::{BlobKind, TypedList, TypedValue};
