use super::*;
use crate::DialectSettings;
use crate::test_dialect::{GenericDialect, generic_type_map};
use pretty_assertions::assert_eq;

fn build(column: ColumnDefinition) -> String {
    build_column(&GenericDialect::new(), &column).unwrap()
}

#[test]
fn test_integer_with_default_and_not_null() {
    let column = ColumnDefinition::new("age", "integer")
        .with_default(0)
        .not_null();
    assert_eq!(build(column), "age INTEGER DEFAULT 0 NOT NULL");
}

#[test]
fn test_default_null_precedence() {
    let cases = [
        (
            ColumnOptions::new().with_default("x").not_null(),
            "c VARCHAR(255) DEFAULT 'x' NOT NULL",
        ),
        (
            ColumnOptions::new().with_default("x"),
            "c VARCHAR(255) DEFAULT 'x'",
        ),
        (
            ColumnOptions::new().with_default("x").null(true),
            "c VARCHAR(255) DEFAULT 'x'",
        ),
        (ColumnOptions::new().null(true), "c VARCHAR(255) DEFAULT NULL"),
        (ColumnOptions::new().not_null(), "c VARCHAR(255) NOT NULL"),
        (ColumnOptions::new(), "c VARCHAR(255)"),
    ];

    for (options, expected) in cases {
        let column = ColumnDefinition::new("c", "string").with_options(options);
        assert_eq!(build(column), expected);
    }
}

#[test]
fn test_empty_string_default_means_no_default() {
    let column = ColumnDefinition::new("c", "string")
        .with_default("")
        .not_null();
    assert_eq!(build(column), "c VARCHAR(255) NOT NULL");

    let column = ColumnDefinition::new("c", "string").with_default(Value::Null);
    assert_eq!(build(column), "c VARCHAR(255)");
}

#[test]
fn test_mapping_fills_unset_limit() {
    assert_eq!(
        build(ColumnDefinition::new("name", "string")),
        "name VARCHAR(255)"
    );
    assert_eq!(
        build(ColumnDefinition::new("name", "string").limit(0)),
        "name VARCHAR(255)"
    );
    assert_eq!(
        build(ColumnDefinition::new("name", "string").limit(50)),
        "name VARCHAR(50)"
    );
}

#[test]
fn test_undeclared_attributes_are_stripped() {
    assert_eq!(
        build(ColumnDefinition::new("id", "integer").limit(11)),
        "id INTEGER"
    );
    assert_eq!(
        build(
            ColumnDefinition::new("body", "text")
                .precision(5)
                .scale(2)
        ),
        "body TEXT"
    );
}

#[test]
fn test_precision_and_scale() {
    assert_eq!(
        build(ColumnDefinition::new("price", "decimal")),
        "price DECIMAL(10,0)"
    );
    assert_eq!(
        build(ColumnDefinition::new("price", "decimal").precision(8).scale(2)),
        "price DECIMAL(8,2)"
    );
}

#[test]
fn test_precision_without_scale_renders_empty_scale() {
    assert_eq!(
        build(ColumnDefinition::new("ratio", "float").scale(3)),
        "ratio FLOAT(8,)"
    );
}

#[test]
fn test_unmapped_type_passes_through() {
    assert_eq!(
        build(ColumnDefinition::new("data", "jsonb")),
        "data jsonb"
    );
    assert_eq!(
        build(ColumnDefinition::new("code", "char").limit(2)),
        "code char(2)"
    );
}

#[test]
fn test_missing_name_and_type() {
    let dialect = GenericDialect::new();

    let result = build_column(&dialect, &ColumnDefinition::of_type("string"));
    assert!(matches!(result, Err(DdlError::MissingField(msg)) if msg == "Column name not specified"));

    let result = build_column(&dialect, &ColumnDefinition::new("", "string"));
    assert!(matches!(result, Err(DdlError::MissingField(_))));

    let result = build_column(&dialect, &ColumnDefinition::new("email", ""));
    assert!(matches!(result, Err(DdlError::MissingField(msg)) if msg == "Column type not specified"));
}

#[test]
fn test_unescaped_default_is_verbatim() {
    let column = ColumnDefinition::new("c", "string").with_default("it's");
    assert_eq!(build(column), "c VARCHAR(255) DEFAULT 'it's'");
}

#[test]
fn test_escaped_literal_style() {
    let dialect = GenericDialect::with_settings(
        DialectSettings::new(generic_type_map()).with_literal_style(LiteralStyle::Escaped),
    );
    let column = ColumnDefinition::new("c", "string").with_default("it's");
    assert_eq!(
        build_column(&dialect, &column).unwrap(),
        "c VARCHAR(255) DEFAULT 'it''s'"
    );
}

#[test]
fn test_boolean_default_renders_as_digit() {
    let column = ColumnDefinition::new("active", "boolean").with_default(true);
    assert_eq!(build(column), "active BOOLEAN DEFAULT '1'");
}

#[test]
fn test_resolve_keeps_unmapped_attributes() {
    let column = ColumnDefinition::new("code", "char").limit(2).precision(4);
    let resolved = ResolvedColumn::resolve(&generic_type_map(), &column).unwrap();
    assert_eq!(resolved.native_type, "char");
    assert_eq!(resolved.limit, Some(2));
    assert_eq!(resolved.precision, Some(4));
}

#[test]
fn test_deserialize_column_definition() {
    let column: ColumnDefinition = serde_json::from_str(
        r#"{"name": "age", "type": "integer", "default": 0, "null": false}"#,
    )
    .unwrap();
    assert_eq!(column.type_name(), Some("integer"));
    assert_eq!(column.options.default, Some(Value::Integer(0)));
    assert_eq!(build(column), "age INTEGER DEFAULT 0 NOT NULL");
}
