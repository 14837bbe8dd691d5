use opdesc::{BuildConfig, OpCode, Operation, OperationBuilder, SerializerKind};
use opdesc_core::{BlobKind, TypedValue};
use opdesc_json::descriptor_from_str;

fn build(json: &str) -> Operation {
    let descriptor = descriptor_from_str(json).unwrap();
    OperationBuilder::default().build(&descriptor).unwrap()
}

#[test]
fn test_build_config_creation() {
    let config = BuildConfig {
        serializer: SerializerKind::Json,
        continue_on_error: true,
    };

    assert_eq!(config.serializer, SerializerKind::Json);
    assert!(config.continue_on_error);
    assert_eq!(config.serializer.policy().name(), "json");
}

#[test]
fn test_builder_default_policy() {
    let builder = OperationBuilder::default();
    assert_eq!(builder.policy().name(), "none");
}

#[test]
fn test_every_op_code_builds() {
    let cases = [
        (r#"{"op": 1001, "bin": "l", "val": "x"}"#, OpCode::ListAppend),
        (r#"{"op": 1002, "bin": "l", "val": [1, 2]}"#, OpCode::ListAppendItems),
        (r#"{"op": 1003, "bin": "l", "index": 0, "val": 1}"#, OpCode::ListInsert),
        (r#"{"op": 1005, "bin": "l", "index": -1}"#, OpCode::ListPop),
        (r#"{"op": 1008, "bin": "l", "index": 1}"#, OpCode::ListRemoveRange),
        (r#"{"op": 1009, "bin": "l"}"#, OpCode::ListClear),
        (r#"{"op": 1010, "bin": "l", "index": 2, "val": null}"#, OpCode::ListSet),
        (r#"{"op": 1011, "bin": "l", "index": 0}"#, OpCode::ListGet),
        (r#"{"op": 1012, "bin": "l", "index": 0, "count": 2}"#, OpCode::ListGetRange),
        (r#"{"op": 1013, "bin": "l", "index": 0, "count": 2}"#, OpCode::ListTrim),
        (r#"{"op": 1014, "bin": "l"}"#, OpCode::ListSize),
        (r#"{"op": 1015, "bin": "l", "index": 0, "val": 5}"#, OpCode::ListIncrement),
        (r#"{"op": 1020, "bin": "l", "sort_flags": 1}"#, OpCode::ListSort),
        (r#"{"op": 1100, "bin": "l", "val": "v"}"#, OpCode::Write),
    ];

    for (json, expected) in cases {
        let op = build(json);
        assert_eq!(op.op_code(), expected, "descriptor {json}");
        assert_eq!(op.bin(), "l");
    }
}

#[test]
fn test_list_set_required_null_is_nil() {
    let op = build(r#"{"op": 1010, "bin": "l", "index": 2, "val": null}"#);
    assert_eq!(
        op,
        Operation::ListSet {
            bin: "l".to_string(),
            index: 2,
            value: TypedValue::Nil,
        }
    );
}

#[test]
fn test_list_append_items_uses_values_label() {
    let descriptor = descriptor_from_str(r#"{"op": 1002, "bin": "l", "val": 3}"#).unwrap();
    let err = OperationBuilder::default().build(&descriptor).unwrap_err();
    assert_eq!(err.to_string(), "values: Value must be a list");
}

#[test]
fn test_list_sort_truncates_flags() {
    let op = build(r#"{"op": 1020, "bin": "l", "sort_flags": 4294967298}"#);
    assert_eq!(
        op,
        Operation::ListSort {
            bin: "l".to_string(),
            flags: Some(2),
        }
    );
}

#[test]
fn test_json_policy_encodes_floats() {
    let descriptor = descriptor_from_str(r#"{"op": 1001, "bin": "l", "val": 0.25}"#).unwrap();
    let builder = OperationBuilder::new(SerializerKind::Json.policy());

    let op = builder.build(&descriptor).unwrap();
    assert_eq!(
        op,
        Operation::ListAppend {
            bin: "l".to_string(),
            value: TypedValue::blob(BlobKind::Json, b"0.25".to_vec()),
        }
    );
}
