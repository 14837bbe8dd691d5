//! Typed operation construction from descriptors.
//!
//! A descriptor names its operation with an integer `op` code; the remaining
//! fields are read through [`crate::fields`]. Each [`OperationBuilder::build`]
//! call is one construction pass with its own [`DeferredStringRegistry`].

use crate::error::{CoercionError, CoercionResult};
use crate::fields::{
    get_bin_name, get_list_value, get_optional_i64, get_optional_int_null_aware,
    get_required_i64, get_value,
};
use crate::registry::DeferredStringRegistry;
use opdesc_core::{OperationDescriptor, SerializerPolicy, TypedList, TypedValue};
use opdesc_json::JsonValue;
use serde_json::json;

pub const OP_KEY: &str = "op";
pub const VAL_KEY: &str = "val";
pub const INDEX_KEY: &str = "index";
pub const COUNT_KEY: &str = "count";
pub const SORT_FLAGS_KEY: &str = "sort_flags";

/// Operation codes accepted in the `op` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    ListAppend,
    ListAppendItems,
    ListInsert,
    ListPop,
    ListRemoveRange,
    ListClear,
    ListSet,
    ListGet,
    ListGetRange,
    ListTrim,
    ListSize,
    ListIncrement,
    ListSort,
    Write,
}

impl OpCode {
    const ALL: [OpCode; 14] = [
        Self::ListAppend,
        Self::ListAppendItems,
        Self::ListInsert,
        Self::ListPop,
        Self::ListRemoveRange,
        Self::ListClear,
        Self::ListSet,
        Self::ListGet,
        Self::ListGetRange,
        Self::ListTrim,
        Self::ListSize,
        Self::ListIncrement,
        Self::ListSort,
        Self::Write,
    ];

    /// Numeric code as it appears in descriptors.
    pub fn code(self) -> i64 {
        match self {
            Self::ListAppend => 1001,
            Self::ListAppendItems => 1002,
            Self::ListInsert => 1003,
            Self::ListPop => 1005,
            Self::ListRemoveRange => 1008,
            Self::ListClear => 1009,
            Self::ListSet => 1010,
            Self::ListGet => 1011,
            Self::ListGetRange => 1012,
            Self::ListTrim => 1013,
            Self::ListSize => 1014,
            Self::ListIncrement => 1015,
            Self::ListSort => 1020,
            Self::Write => 1100,
        }
    }

    /// Look an operation up by its numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ListAppend => "list_append",
            Self::ListAppendItems => "list_append_items",
            Self::ListInsert => "list_insert",
            Self::ListPop => "list_pop",
            Self::ListRemoveRange => "list_remove_range",
            Self::ListClear => "list_clear",
            Self::ListSet => "list_set",
            Self::ListGet => "list_get",
            Self::ListGetRange => "list_get_range",
            Self::ListTrim => "list_trim",
            Self::ListSize => "list_size",
            Self::ListIncrement => "list_increment",
            Self::ListSort => "list_sort",
            Self::Write => "write",
        }
    }
}

/// Fully-typed operation. Owns all of its data, so it outlives the
/// descriptor and the pass that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListAppend { bin: String, value: TypedValue },
    ListAppendItems { bin: String, values: TypedList },
    ListInsert { bin: String, index: i64, value: TypedValue },
    ListPop { bin: String, index: i64 },
    ListRemoveRange { bin: String, index: i64, count: Option<i64> },
    ListClear { bin: String },
    ListSet { bin: String, index: i64, value: TypedValue },
    ListGet { bin: String, index: i64 },
    ListGetRange { bin: String, index: i64, count: Option<i64> },
    ListTrim { bin: String, index: i64, count: i64 },
    ListSize { bin: String },
    ListIncrement { bin: String, index: i64, value: TypedValue },
    ListSort { bin: String, flags: Option<i32> },
    /// `value: None` clears the bin
    Write { bin: String, value: Option<TypedValue> },
}

impl Operation {
    pub fn op_code(&self) -> OpCode {
        match self {
            Self::ListAppend { .. } => OpCode::ListAppend,
            Self::ListAppendItems { .. } => OpCode::ListAppendItems,
            Self::ListInsert { .. } => OpCode::ListInsert,
            Self::ListPop { .. } => OpCode::ListPop,
            Self::ListRemoveRange { .. } => OpCode::ListRemoveRange,
            Self::ListClear { .. } => OpCode::ListClear,
            Self::ListSet { .. } => OpCode::ListSet,
            Self::ListGet { .. } => OpCode::ListGet,
            Self::ListGetRange { .. } => OpCode::ListGetRange,
            Self::ListTrim { .. } => OpCode::ListTrim,
            Self::ListSize { .. } => OpCode::ListSize,
            Self::ListIncrement { .. } => OpCode::ListIncrement,
            Self::ListSort { .. } => OpCode::ListSort,
            Self::Write { .. } => OpCode::Write,
        }
    }

    pub fn bin(&self) -> &str {
        match self {
            Self::ListAppend { bin, .. }
            | Self::ListAppendItems { bin, .. }
            | Self::ListInsert { bin, .. }
            | Self::ListPop { bin, .. }
            | Self::ListRemoveRange { bin, .. }
            | Self::ListClear { bin }
            | Self::ListSet { bin, .. }
            | Self::ListGet { bin, .. }
            | Self::ListGetRange { bin, .. }
            | Self::ListTrim { bin, .. }
            | Self::ListSize { bin }
            | Self::ListIncrement { bin, .. }
            | Self::ListSort { bin, .. }
            | Self::Write { bin, .. } => bin,
        }
    }

    /// Render as a JSON object: `{"op": <name>, "bin": <bin>, ...fields}`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("op".to_string(), json!(self.op_code().name()));
        obj.insert("bin".to_string(), json!(self.bin()));

        let value_json = |v: &TypedValue| JsonValue::from(v).into_inner();
        match self {
            Self::ListAppend { value, .. } => {
                obj.insert(VAL_KEY.to_string(), value_json(value));
            }
            Self::ListAppendItems { values, .. } => {
                obj.insert(
                    VAL_KEY.to_string(),
                    serde_json::Value::Array(values.iter().map(value_json).collect()),
                );
            }
            Self::ListInsert { index, value, .. }
            | Self::ListSet { index, value, .. }
            | Self::ListIncrement { index, value, .. } => {
                obj.insert(INDEX_KEY.to_string(), json!(index));
                obj.insert(VAL_KEY.to_string(), value_json(value));
            }
            Self::ListPop { index, .. } | Self::ListGet { index, .. } => {
                obj.insert(INDEX_KEY.to_string(), json!(index));
            }
            Self::ListRemoveRange { index, count, .. }
            | Self::ListGetRange { index, count, .. } => {
                obj.insert(INDEX_KEY.to_string(), json!(index));
                obj.insert(COUNT_KEY.to_string(), json!(count));
            }
            Self::ListTrim { index, count, .. } => {
                obj.insert(INDEX_KEY.to_string(), json!(index));
                obj.insert(COUNT_KEY.to_string(), json!(count));
            }
            Self::ListSort { flags, .. } => {
                obj.insert(SORT_FLAGS_KEY.to_string(), json!(flags));
            }
            Self::Write { value, .. } => {
                let rendered = value.as_ref().map_or(serde_json::Value::Null, value_json);
                obj.insert(VAL_KEY.to_string(), rendered);
            }
            Self::ListClear { .. } | Self::ListSize { .. } => {}
        }
        serde_json::Value::Object(obj)
    }
}

/// Error type for operation construction.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// A field could not be extracted
    #[error(transparent)]
    Field(#[from] CoercionError),

    /// The `op` field holds a code no operation answers to
    #[error("Unknown operation code {0}")]
    UnknownOpCode(i64),
}

/// Builds typed operations from descriptors.
#[derive(Debug, Clone, Default)]
pub struct OperationBuilder {
    policy: SerializerPolicy,
}

impl OperationBuilder {
    /// Create a builder encoding opaque values with `policy`.
    pub fn new(policy: SerializerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SerializerPolicy {
        &self.policy
    }

    /// Build one operation in its own construction pass.
    ///
    /// The pass's registry drops its deferred strings when the pass ends,
    /// whether or not the build succeeded.
    pub fn build(&self, descriptor: &OperationDescriptor) -> Result<Operation, OperationError> {
        let mut registry = DeferredStringRegistry::new();
        self.build_with_registry(descriptor, &mut registry)
    }

    /// Build one operation, registering deferred strings in a caller-owned
    /// registry.
    pub fn build_with_registry(
        &self,
        descriptor: &OperationDescriptor,
        registry: &mut DeferredStringRegistry,
    ) -> Result<Operation, OperationError> {
        let code = get_required_i64(descriptor, OP_KEY)?;
        let op_code = OpCode::from_code(code).ok_or(OperationError::UnknownOpCode(code))?;
        let bin = get_bin_name(descriptor, registry)?.to_string();
        let policy = &self.policy;

        let operation = match op_code {
            OpCode::ListAppend => Operation::ListAppend {
                bin,
                value: required_value(descriptor, policy)?,
            },
            OpCode::ListAppendItems => Operation::ListAppendItems {
                bin,
                values: get_list_value(descriptor, VAL_KEY, policy)?,
            },
            OpCode::ListInsert => Operation::ListInsert {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                value: required_value(descriptor, policy)?,
            },
            OpCode::ListPop => Operation::ListPop {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
            },
            OpCode::ListRemoveRange => Operation::ListRemoveRange {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                count: get_optional_i64(descriptor, COUNT_KEY)?,
            },
            OpCode::ListClear => Operation::ListClear { bin },
            OpCode::ListSet => Operation::ListSet {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                value: required_value(descriptor, policy)?,
            },
            OpCode::ListGet => Operation::ListGet {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
            },
            OpCode::ListGetRange => Operation::ListGetRange {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                count: get_optional_i64(descriptor, COUNT_KEY)?,
            },
            OpCode::ListTrim => Operation::ListTrim {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                count: get_required_i64(descriptor, COUNT_KEY)?,
            },
            OpCode::ListSize => Operation::ListSize { bin },
            OpCode::ListIncrement => Operation::ListIncrement {
                bin,
                index: get_required_i64(descriptor, INDEX_KEY)?,
                value: required_value(descriptor, policy)?,
            },
            OpCode::ListSort => Operation::ListSort {
                bin,
                flags: get_optional_int_null_aware(descriptor, SORT_FLAGS_KEY)?,
            },
            OpCode::Write => Operation::Write {
                bin,
                value: get_value(descriptor, VAL_KEY, policy, false)?,
            },
        };

        tracing::debug!(
            op = operation.op_code().name(),
            bin = operation.bin(),
            deferred = registry.len(),
            "Built operation"
        );
        Ok(operation)
    }
}

fn required_value(
    descriptor: &OperationDescriptor,
    policy: &SerializerPolicy,
) -> CoercionResult<TypedValue> {
    get_value(descriptor, VAL_KEY, policy, true)?.ok_or_else(|| {
        CoercionError::missing_field(format!("Operation must contain a \"{VAL_KEY}\" entry"))
    })
}
