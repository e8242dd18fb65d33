//! Tests for sanitize-model types.

use sanitize_model::{MapRecord, Record, TransformMap, TransformOption, Value};

#[test]
fn transform_map_keeps_document_order() {
    let map: TransformMap =
        serde_json::from_str(r#"{"truncate": 6, "case": "upcase", "strip": true}"#)
            .expect("parse transform map");
    let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["truncate", "case", "strip"]);
}

#[test]
fn transform_map_keeps_duplicate_names() {
    let map: TransformMap = serde_json::from_str(r#"{"remove": "-", "remove": "."}"#)
        .expect("parse transform map");
    assert_eq!(map.len(), 2);
}

#[test]
fn transform_options_parse_by_shape() {
    let map: TransformMap = serde_json::from_str(
        r#"{
            "nullify": true,
            "round": 2,
            "case": "titlecase",
            "gsub": {"pattern": "[^0-9]", "replacement": ""},
            "remove": {"pattern": "-+"}
        }"#,
    )
    .expect("parse transform map");
    let options: Vec<&TransformOption> = map.iter().map(|(_, option)| option).collect();
    assert_eq!(options[0], &TransformOption::Flag(true));
    assert_eq!(options[1], &TransformOption::Integer(2));
    assert_eq!(options[2], &TransformOption::from("titlecase"));
    assert_eq!(options[3], &TransformOption::replace("[^0-9]", ""));
    assert_eq!(options[4], &TransformOption::pattern("-+"));
}

#[test]
fn map_record_round_trips_json_object() {
    let json = r#"{"first_name":"John","income":12345.5,"age":42,"active":false,"ssn":null}"#;
    let record: MapRecord = serde_json::from_str(json).expect("parse record");

    assert_eq!(record.get_attribute("first_name"), Some(Value::from("John")));
    assert_eq!(record.get_attribute("income"), Some(Value::Float(12345.5)));
    assert_eq!(record.get_attribute("age"), Some(Value::Int(42)));
    assert_eq!(record.get_attribute("active"), Some(Value::Bool(false)));
    assert_eq!(record.get_attribute("ssn"), Some(Value::Null));
    assert_eq!(record.get_attribute("missing"), None);

    let out = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(out, json);
}

#[test]
fn map_record_rejects_nested_values() {
    let parsed = serde_json::from_str::<MapRecord>(r#"{"tags": ["a", "b"]}"#);
    assert!(parsed.is_err());
}
