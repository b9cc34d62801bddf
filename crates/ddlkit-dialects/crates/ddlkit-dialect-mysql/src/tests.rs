use super::*;
use ddlkit_core::testing::{ScriptedConnection, row};
use ddlkit_core::{DdlError, Row, Value};
use ddlkit_schema::{
    ColumnDefinition, ColumnOptions, PRIMARY_KEY, SchemaBuilder, TableDefinition, TableField,
    TableOptions,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn builder() -> SchemaBuilder {
    SchemaBuilder::new(Arc::new(MySqlDialect::new()))
}

fn connected(conn: ScriptedConnection) -> (SchemaBuilder, Arc<ScriptedConnection>) {
    let conn = Arc::new(conn);
    (builder().with_connection(conn.clone()), conn)
}

fn column_row(
    field: &str,
    column_type: &str,
    null: &str,
    key: &str,
    default: Option<&str>,
    extra: &str,
) -> Row {
    row([
        ("Field", Value::from(field)),
        ("Type", Value::from(column_type)),
        ("Collation", Value::Null),
        ("Null", Value::from(null)),
        ("Key", Value::from(key)),
        ("Default", Value::from(default)),
        ("Extra", Value::from(extra)),
    ])
}

fn users_columns() -> Vec<Row> {
    vec![
        column_row("id", "int(11)", "NO", "PRI", None, "auto_increment"),
        column_row("email", "varchar(100)", "YES", "", None, ""),
        column_row("active", "tinyint(1)", "NO", "", Some("1"), ""),
        column_row("balance", "decimal(8,2)", "NO", "", Some("0.00"), ""),
        column_row("location", "point", "YES", "", None, ""),
    ]
}

#[test]
fn test_build_column() {
    let column = ColumnDefinition::new("age", "integer")
        .with_default(0)
        .not_null();
    assert_eq!(
        builder().build_column(&column).unwrap(),
        "age INT(11) DEFAULT 0 NOT NULL"
    );
}

#[test]
fn test_create_table() {
    let definition = TableDefinition::new()
        .column("id", PRIMARY_KEY)
        .column("name", ColumnDefinition::of_type("string").not_null())
        .column(
            "balance",
            ColumnDefinition::of_type("decimal").precision(10).scale(2),
        )
        .column("created", "datetime");

    let sql = builder()
        .create_table("users", &definition, &TableOptions::raw("ENGINE=InnoDB"))
        .unwrap();

    assert_eq!(
        sql,
        indoc! {"
            CREATE TABLE users (
             id INT NOT NULL AUTO_INCREMENT,
             name VARCHAR(255) NOT NULL,
             balance DECIMAL(10,2),
             created DATETIME,
             PRIMARY KEY (id)
            ) ENGINE=InnoDB"}
    );
}

#[test]
fn test_alter_statements() {
    let builder = builder();

    assert_eq!(
        builder
            .change_column(
                "users",
                "name",
                "string",
                &ColumnOptions::new().limit(100).not_null()
            )
            .unwrap(),
        "ALTER TABLE users MODIFY COLUMN name VARCHAR(100) NOT NULL"
    );
    assert_eq!(
        builder.rename_column("users", "name", "full_name").unwrap(),
        "ALTER TABLE users RENAME COLUMN name TO full_name"
    );
    assert_eq!(
        builder.rename_table("users", "members").unwrap(),
        "RENAME TABLE users TO members"
    );
    assert_eq!(
        builder.remove_index("users", "idx_email").unwrap(),
        "DROP INDEX idx_email ON users"
    );
    assert_eq!(
        builder.rename_index("users", "idx_a", "idx_b").unwrap(),
        "ALTER TABLE users RENAME INDEX idx_a TO idx_b"
    );
    assert_eq!(
        builder.remove_foreign_key("posts", "fk_posts_user").unwrap(),
        "ALTER TABLE posts DROP FOREIGN KEY fk_posts_user"
    );
}

#[test]
fn test_boolean_column() {
    let column = ColumnDefinition::new("active", "boolean").with_default(1);
    assert_eq!(
        builder().build_column(&column).unwrap(),
        "active TINYINT(1) DEFAULT 1"
    );
}

#[tokio::test]
async fn test_schema() {
    let (builder, conn) = connected(
        ScriptedConnection::new("mysql").with_response("SHOW FULL COLUMNS", users_columns()),
    );

    let schema = builder.schema("users").await.unwrap();
    assert_eq!(conn.executed(), vec!["SHOW FULL COLUMNS FROM `users`"]);

    let names: Vec<&str> = schema.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["id", "email", "active", "balance", "location"]);

    assert_eq!(schema["id"].column_type, PRIMARY_KEY);
    assert!(schema["id"].key);
    assert!(!schema["id"].null);

    assert_eq!(schema["email"].column_type, "string");
    assert_eq!(schema["email"].limit, Some(100));
    assert!(schema["email"].null);
    assert_eq!(schema["email"].default, None);

    assert_eq!(schema["active"].column_type, "boolean");
    assert_eq!(schema["active"].default.as_deref(), Some("1"));

    assert_eq!(schema["balance"].column_type, "decimal");
    assert_eq!(
        (schema["balance"].precision, schema["balance"].scale),
        (Some(8), Some(2))
    );

    assert_eq!(schema["location"].column_type, "point");
}

#[tokio::test]
async fn test_schema_round_trips_through_create_table() {
    let (builder, _) = connected(
        ScriptedConnection::new("mysql").with_response(
            "SHOW FULL COLUMNS",
            vec![
                column_row("id", "int(11)", "NO", "PRI", None, "auto_increment"),
                column_row("title", "varchar(120)", "NO", "", None, ""),
            ],
        ),
    );

    let schema = builder.schema("posts").await.unwrap();
    let definition: TableDefinition = schema
        .iter()
        .map(|(name, column)| (name.clone(), TableField::from(column)))
        .collect();

    assert_eq!(
        builder
            .create_table("posts", &definition, &TableOptions::default())
            .unwrap(),
        indoc! {"
            CREATE TABLE posts (
             id INT NOT NULL AUTO_INCREMENT,
             title VARCHAR(120) NOT NULL,
             PRIMARY KEY (id)
            )"}
    );
}

#[tokio::test]
async fn test_columns_and_column_exists() {
    let (builder, _) = connected(
        ScriptedConnection::new("mysql").with_response("SHOW FULL COLUMNS", users_columns()),
    );
    assert_eq!(builder.columns("users").await.unwrap().len(), 5);
    assert!(builder.column_exists("users", "email").await.unwrap());
    assert!(!builder.column_exists("users", "phone").await.unwrap());
}

#[tokio::test]
async fn test_indexes_group_columns() {
    let index_row = |name: &str, column: &str, non_unique: Value| {
        row([
            ("Table", Value::from("users")),
            ("Non_unique", non_unique),
            ("Key_name", Value::from(name)),
            ("Seq_in_index", Value::from(1)),
            ("Column_name", Value::from(column)),
        ])
    };
    let (builder, conn) = connected(ScriptedConnection::new("mysql").with_response(
        "SHOW INDEX",
        vec![
            index_row("PRIMARY", "id", Value::from(0)),
            index_row("idx_name", "first_name", Value::from("1")),
            index_row("idx_name", "last_name", Value::from("1")),
        ],
    ));

    let indexes = builder.indexes("users").await.unwrap();
    assert_eq!(conn.executed(), vec!["SHOW INDEX FROM `users`"]);
    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[0].name, "PRIMARY");
    assert!(indexes[0].unique);
    assert_eq!(indexes[1].columns, vec!["first_name", "last_name"]);
    assert!(!indexes[1].unique);
}

#[tokio::test]
async fn test_foreign_keys() {
    let (builder, conn) = connected(ScriptedConnection::new("mysql").with_response(
        "KEY_COLUMN_USAGE",
        vec![row([
            ("constraint_name", "fk_posts_user"),
            ("table_name", "posts"),
            ("column_name", "user_id"),
            ("referenced_table_name", "users"),
            ("referenced_column_name", "id"),
        ])],
    ));

    let keys = builder.foreign_keys("posts").await.unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].referenced_table_name, "users");
    assert!(conn.executed()[0].contains("TABLE_NAME = 'posts'"));

    assert!(
        builder
            .foreign_key_exists("posts", &ddlkit_schema::ForeignKeyLookup::name("fk_posts_user"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_introspection_quotes_table_names() {
    let (builder, conn) = connected(ScriptedConnection::new("mysql"));
    builder.foreign_keys("o'brien").await.unwrap();
    builder.indexes("we`ird").await.unwrap();
    let executed = conn.executed();
    assert!(executed[0].contains("TABLE_NAME = 'o''brien'"));
    assert_eq!(executed[1], "SHOW INDEX FROM `we``ird`");
}

#[tokio::test]
async fn test_show_create_table() {
    let (builder, _) = connected(ScriptedConnection::new("mysql").with_response(
        "SHOW CREATE TABLE `users`",
        vec![row([
            ("Table", "users"),
            ("Create Table", "CREATE TABLE `users` (\n  `id` int NOT NULL\n)"),
        ])],
    ));

    assert_eq!(
        builder.show_create_table("users").await.unwrap(),
        "CREATE TABLE `users` (\n  `id` int NOT NULL\n)"
    );
    assert!(matches!(
        builder.show_create_table("missing").await,
        Err(DdlError::NotFound(_))
    ));
}
