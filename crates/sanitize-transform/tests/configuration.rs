//! Configuration-time validation and JSON declarations.

use sanitize_model::{MapRecord, ModelSchema, TransformError, TransformOption, Value};
use sanitize_transform::{ConfigError, DeclarationError, ModelConfig, ModelDeclaration, TransformRegistry};

fn registry() -> TransformRegistry<MapRecord> {
    TransformRegistry::new()
        .with_attribute_transform(
            "ssn",
            |_: &MapRecord, _: &str, value: Value| -> Result<Value, TransformError> { Ok(value) },
        )
        .with_record_transform("person", |_: &mut MapRecord| -> Result<(), TransformError> {
            Ok(())
        })
}

fn person() -> ModelConfig<MapRecord> {
    ModelConfig::new(ModelSchema::new("person").with_attributes(["first_name", "ssn"]))
}

fn configure_err(attribute: &str, name: &str, option: TransformOption) -> String {
    person()
        .configure(&registry(), attribute, [(name, option)])
        .unwrap_err()
        .to_string()
}

#[test]
fn test_config_error_messages() {
    insta::assert_snapshot!(
        configure_err("middle_name", "strip", true.into()),
        @"missing attribute: middle_name on person"
    );
    insta::assert_snapshot!(
        configure_err("first_name", "zip", true.into()),
        @"unknown transform: 'zip'"
    );
    insta::assert_snapshot!(
        configure_err("first_name", "person", true.into()),
        @"transform 'person' does not provide an attribute transform"
    );
    insta::assert_snapshot!(
        configure_err("first_name", "truncate", (-1i64).into()),
        @"invalid options for truncate: expected a non-negative integer length, got integer"
    );
    insta::assert_snapshot!(
        configure_err("first_name", "strip", "yes".into()),
        @"invalid options for strip: expected a boolean, got string"
    );
    insta::assert_snapshot!(
        configure_err("first_name", "gsub", "-".into()),
        @"invalid options for gsub: expected a pattern and replacement, got string"
    );
}

#[test]
fn test_empty_transform_set_is_rejected() {
    let err = person()
        .configure(&registry(), "first_name", Vec::<(String, TransformOption)>::new())
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTransformSet { ref attribute } if attribute == "first_name"));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let err = person()
        .configure(
            &registry(),
            "first_name",
            [("gsub", TransformOption::replace("(unclosed", ""))],
        )
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { transform: "gsub", .. }));
}

#[test]
fn test_unprovisioned_model_accepts_anything() {
    let mut config = ModelConfig::<MapRecord>::new(
        ModelSchema::new("person")
            .with_attribute("first_name")
            .provisioned(false),
    );
    config
        .configure(&registry(), "no_such_column", [("no_such_transform", true)])
        .unwrap();
    config
        .configure_whole_record_named(&registry(), "no_such_record_transform")
        .unwrap();
    assert!(!config.is_configured());

    let mut record = MapRecord::new().with("first_name", "  untouched ");
    let report = config.sanitize(&mut record).unwrap();
    assert!(report.skipped);
    assert_eq!(record.get("first_name"), Some(&Value::from("  untouched ")));
}

#[test]
fn test_record_transform_names_are_checked() {
    let mut config = person();
    let err = config
        .configure_whole_record_named(&registry(), "ssn")
        .unwrap_err();
    assert_eq!(err.to_string(), "transform 'ssn' does not provide a record transform");

    let err = config
        .configure_whole_record_named(&registry(), "nobody")
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTransform { .. }));
}

const PERSON: &str = r#"{
    "model": "person",
    "attributes": ["first_name", "last_name", "zip_code", "ssn"],
    "sanitizes": [
        { "attribute": "first_name", "transforms": { "strip": true, "case": "titlecase" } },
        { "attribute": "last_name", "transforms": { "case": "upcase", "truncate": 6 } },
        { "attribute": "zip_code", "transforms": { "remove": "-" } },
        { "attribute": "ssn", "transforms": { "ssn": true } }
    ],
    "sanitizes_with": "person"
}"#;

#[test]
fn test_declaration_builds_config_in_order() {
    let declaration = ModelDeclaration::from_json(PERSON).unwrap();
    let config = ModelConfig::from_declaration(&declaration, &registry()).unwrap();

    let chains: Vec<(String, Vec<String>)> = config
        .attributes()
        .iter()
        .map(|attribute| {
            (
                attribute.attribute().to_string(),
                attribute.transform_names().map(str::to_string).collect(),
            )
        })
        .collect();
    insta::assert_json_snapshot!(chains, @r#"
    [
      [
        "first_name",
        [
          "strip",
          "case"
        ]
      ],
      [
        "last_name",
        [
          "case",
          "truncate"
        ]
      ],
      [
        "zip_code",
        [
          "remove"
        ]
      ],
      [
        "ssn",
        [
          "ssn"
        ]
      ]
    ]
    "#);
    assert_eq!(config.record_transform().map(|whole| whole.name.as_str()), Some("person"));

    let mut record = MapRecord::new()
        .with("first_name", "  john_patrick ")
        .with("last_name", "Jingleheimer")
        .with("zip_code", "55555-4444")
        .with("ssn", "333224444");
    config.sanitize(&mut record).unwrap();
    assert_eq!(record.get("first_name"), Some(&Value::from("John Patrick")));
    assert_eq!(record.get("last_name"), Some(&Value::from("JINGLE")));
}

#[test]
fn test_declaration_with_unknown_transform_fails_to_build() {
    let declaration = ModelDeclaration::from_json(
        r#"{
            "model": "person",
            "attributes": ["first_name"],
            "sanitizes": [{ "attribute": "first_name", "transforms": { "shout": true } }]
        }"#,
    )
    .unwrap();
    let err = ModelConfig::from_declaration(&declaration, &registry()).unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::Config(ConfigError::UnknownTransform { ref name }) if name == "shout"
    ));
    assert_eq!(err.to_string(), "unknown transform: 'shout'");
}

#[test]
fn test_declaration_parse_errors() {
    let err = ModelDeclaration::from_json(r#"{ "model": "person" }"#).unwrap_err();
    assert!(matches!(err, DeclarationError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse declaration"));

    let err = ModelDeclaration::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, DeclarationError::Io { .. }));
}
