#![cfg(all(feature = "mysql", feature = "postgres", feature = "sqlite"))]

//! Configuration-driven builder tests across the built-in dialects

use ddlkit_core::testing::{ScriptedConnection, row};
use ddlkit_dialects::{DdlError, SchemaConfig, open_schema};
use ddlkit_schema::{
    ColumnDefinition, ColumnOptions, LiteralStyle, PRIMARY_KEY, TableDefinition, TableOptions,
    TypeMapping,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

fn users() -> TableDefinition {
    TableDefinition::new()
        .column("id", PRIMARY_KEY)
        .column("email", ColumnDefinition::of_type("string").not_null())
        .column("created", "datetime")
}

#[test]
fn test_same_table_in_every_dialect() {
    let expected = [
        (
            "mysql",
            indoc! {"
                CREATE TABLE users (
                 id INT NOT NULL AUTO_INCREMENT,
                 email VARCHAR(255) NOT NULL,
                 created DATETIME,
                 PRIMARY KEY (id)
                )"},
        ),
        (
            "postgres",
            indoc! {"
                CREATE TABLE users (
                 id SERIAL NOT NULL,
                 email VARCHAR(255) NOT NULL,
                 created TIMESTAMP,
                 PRIMARY KEY (id)
                )"},
        ),
        (
            "sqlite",
            indoc! {"
                CREATE TABLE users (
                 id INTEGER,
                 email VARCHAR(255) NOT NULL,
                 created DATETIME,
                 PRIMARY KEY (id)
                )"},
        ),
    ];

    for (dialect, sql) in expected {
        let builder = open_schema(&SchemaConfig::new(dialect)).unwrap();
        assert_eq!(
            builder
                .create_table("users", &users(), &TableOptions::default())
                .unwrap(),
            sql,
            "dialect {}",
            dialect
        );
    }
}

#[test]
fn test_config_file_overrides_types_and_literal_style() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        indoc! {r#"
            datasource = "reporting"
            dialect = "mariadb"
            literal_style = "escaped"

            [types.string]
            name = "VARCHAR"
            limit = 191
        "#}
    )
    .unwrap();

    let config = SchemaConfig::from_file(file.path()).unwrap();
    let builder = open_schema(&config).unwrap();

    assert_eq!(builder.datasource(), "reporting");
    assert_eq!(builder.dialect().name(), "mysql");
    assert_eq!(builder.dialect().literal_style(), LiteralStyle::Escaped);
    assert_eq!(
        builder
            .add_column(
                "users",
                "nickname",
                "string",
                &ColumnOptions::new().with_default("o'neil")
            )
            .unwrap(),
        "ALTER TABLE users ADD COLUMN nickname VARCHAR(191) DEFAULT 'o''neil'"
    );
}

#[test]
fn test_config_adds_new_logical_types() {
    let config = SchemaConfig::new("pg").with_type("uuid", TypeMapping::new("uuid"));
    let builder = open_schema(&config).unwrap();
    assert_eq!(
        builder
            .build_column(&ColumnDefinition::new("token", "uuid").not_null())
            .unwrap(),
        "token UUID NOT NULL"
    );
}

#[test]
fn test_unknown_dialect() {
    assert!(matches!(
        open_schema(&SchemaConfig::new("oracle")),
        Err(DdlError::UnknownDialect(name)) if name == "oracle"
    ));
}

#[tokio::test]
async fn test_opened_builder_introspects_after_binding() {
    let mut builder = open_schema(&SchemaConfig::new("sqlite3")).unwrap();
    assert!(matches!(
        builder.columns("users").await,
        Err(DdlError::ConnectionNotBound(name)) if name == "default"
    ));

    builder.bind(Arc::new(ScriptedConnection::new("sqlite").with_response(
        "PRAGMA table_info",
        vec![row([
            ("name", ddlkit_core::Value::from("id")),
            ("type", ddlkit_core::Value::from("INTEGER")),
            ("notnull", ddlkit_core::Value::from(1)),
            ("dflt_value", ddlkit_core::Value::Null),
            ("pk", ddlkit_core::Value::from(1)),
        ])],
    )));

    assert_eq!(builder.columns("users").await.unwrap(), vec!["id"]);
}
