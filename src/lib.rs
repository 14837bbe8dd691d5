//! opdesc library
//!
//! Coerces loosely-typed operation descriptors into strongly-typed fields
//! and operations.
//!
//! # Layers
//!
//! - [`accessor`] - field lookup classified as absent / null / value
//! - [`numeric`] - integer coercion with overflow detection
//! - [`strings`] - string extraction with explicit buffer ownership
//! - [`registry`] - deferred release of transcoded strings for one construction pass
//! - [`convert`] - the value-conversion service and serializer policies
//! - [`values`] - typed value and list extraction
//! - [`fields`] - the field contracts used by operation construction
//! - [`operations`] - typed operations built from descriptors
//!
//! # Example
//!
//! ```rust
//! use opdesc::fields::{get_bin_name, get_required_i64};
//! use opdesc::DeferredStringRegistry;
//! use opdesc_core::{DynamicValue, OperationDescriptor};
//!
//! let descriptor = OperationDescriptor::new()
//!     .with("bin", "tags")
//!     .with("index", DynamicValue::Integer(2));
//!
//! let mut registry = DeferredStringRegistry::new();
//! let bin = get_bin_name(&descriptor, &mut registry).unwrap();
//! assert_eq!(bin, "tags");
//! assert_eq!(get_required_i64(&descriptor, "index").unwrap(), 2);
//! ```

pub mod accessor;
pub mod config;
pub mod convert;
pub mod error;
pub mod fields;
pub mod numeric;
pub mod operations;
pub mod registry;
pub mod stream;
pub mod strings;
pub mod values;

pub use accessor::{locate, PresenceState};
pub use config::{BuildConfig, ConfigError, SerializerKind};
pub use convert::{BuiltinConverter, ValueConverter};
pub use error::{CoercionError, CoercionResult, ErrorKind};
pub use operations::{OpCode, Operation, OperationBuilder, OperationError};
pub use registry::DeferredStringRegistry;
pub use strings::{ExtractedStr, StrBuf};
