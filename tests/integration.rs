//! Integration tests for simple-mysql
//!
//! These tests require a running MySQL instance. Connection settings come from
//! `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and `MYSQL_DB`.
//!
//! Run with: cargo test --test integration -- --ignored --nocapture

use serde_json::json;
use simple_mysql::{bindings, ConnectionConfig, Database, Error};
use std::collections::HashMap;
use tokio_test::{assert_err, assert_ok};

fn test_config() -> ConnectionConfig {
    let host = std::env::var("MYSQL_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("MYSQL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3306);
    let user = std::env::var("MYSQL_USER").unwrap_or_else(|_| "root".to_string());
    let password = std::env::var("MYSQL_PASSWORD").unwrap_or_else(|_| "root".to_string());
    let db = std::env::var("MYSQL_DB").unwrap_or_else(|_| "simple_mysql_test".to_string());

    ConnectionConfig::builder(host, db, user, password)
        .port(port)
        .build()
}

/// Helper to connect to test database
async fn connect_test_db() -> Database {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    Database::connect(&test_config())
        .await
        .expect("failed to connect")
}

/// Create a per-test table holding one user with id 1
async fn setup_users(db: &mut Database, table: &str) {
    assert_ok!(db.statement(&format!("DROP TABLE IF EXISTS {}", table), ()).await);
    assert_ok!(
        db.statement(
            &format!(
                "CREATE TABLE {} (id INT PRIMARY KEY, name VARCHAR(64) NULL)",
                table
            ),
            (),
        )
        .await
    );
    assert_ok!(
        db.insert(
            &format!("INSERT INTO {} (id, name) VALUES (?, ?)", table),
            bindings![1, "alice"],
        )
        .await
    );
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_query_by_positional_id() {
    let mut db = connect_test_db().await;
    setup_users(&mut db, "it_users_query").await;

    let rows = db
        .query("SELECT id FROM it_users_query WHERE id = ?", [1])
        .await
        .expect("query");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&json!(1)));
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_empty_results() {
    let mut db = connect_test_db().await;
    setup_users(&mut db, "it_users_empty").await;

    let rows = db
        .query("SELECT id FROM it_users_empty WHERE id = ?", [999])
        .await
        .expect("query");
    assert!(rows.is_empty());

    let row = db
        .query_one("SELECT id FROM it_users_empty WHERE id = ?", [999])
        .await
        .expect("query_one");
    assert!(row.is_none());
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_named_bindings() {
    let mut db = connect_test_db().await;
    setup_users(&mut db, "it_users_named").await;

    let mut params = HashMap::new();
    params.insert("name", "alice");
    params.insert("id", "1");

    let row = db
        .query_one(
            "SELECT id, name FROM it_users_named WHERE id = :id AND name = :name",
            params,
        )
        .await
        .expect("query_one")
        .expect("row");

    assert_eq!(row.get("name"), Some(&json!("alice")));
    assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_write_helpers_behave_identically() {
    let mut db = connect_test_db().await;
    setup_users(&mut db, "it_users_write").await;

    assert!(db
        .insert(
            "INSERT INTO it_users_write (id, name) VALUES (:id, :name)",
            bindings! { "id" => 2, "name" => "bob" },
        )
        .await
        .expect("insert"));
    assert!(db
        .update(
            "UPDATE it_users_write SET name = ? WHERE id = ?",
            bindings!["robert", 2],
        )
        .await
        .expect("update"));
    assert!(db
        .statement(
            "UPDATE it_users_write SET name = ? WHERE id = ?",
            bindings![None::<String>, 2],
        )
        .await
        .expect("statement"));
    assert!(db
        .delete("DELETE FROM it_users_write WHERE id = ?", [2])
        .await
        .expect("delete"));

    // A malformed statement fails the same way through every helper
    let bad = "INSRT INTO it_users_write VALUES (?)";
    for result in [
        db.insert(bad, [1]).await,
        db.update(bad, [1]).await,
        db.delete(bad, [1]).await,
        db.statement(bad, [1]).await,
    ] {
        let err = assert_err!(result);
        assert!(matches!(err, Error::QueryExecutionFailed(_)));
    }
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_null_and_typed_columns() {
    let mut db = connect_test_db().await;

    let row = db
        .query_one(
            "SELECT NULL AS n, CAST(1.50 AS DECIMAL(4,2)) AS d, 'x' AS s, CAST(7 AS UNSIGNED) AS u",
            (),
        )
        .await
        .expect("query_one")
        .expect("row");

    assert_eq!(row.get("n"), Some(&json!(null)));
    assert_eq!(row.get("d"), Some(&json!("1.50")));
    assert_eq!(row.get("s"), Some(&json!("x")));
    assert_eq!(row.get("u"), Some(&json!(7)));
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_temporal_columns_render_as_text() {
    let mut db = connect_test_db().await;

    let row = db
        .query_one(
            "SELECT SEC_TO_TIME(-3600) AS neg, SEC_TO_TIME(93784) AS long_time, \
             CAST('2024-03-09 14:05:59' AS DATETIME) AS dt, CAST('2024-03-09' AS DATE) AS d",
            (),
        )
        .await
        .expect("query_one")
        .expect("row");

    assert_eq!(row.get("neg"), Some(&json!("-01:00:00")));
    assert_eq!(row.get("long_time"), Some(&json!("26:03:04")));
    assert_eq!(row.get("dt"), Some(&json!("2024-03-09 14:05:59")));
    assert_eq!(row.get("d"), Some(&json!("2024-03-09")));

    // Zero dates need a permissive sql_mode to be stored at all
    assert_ok!(db.statement("SET SESSION sql_mode = ''", ()).await);
    assert_ok!(db.statement("DROP TABLE IF EXISTS it_zero_dates", ()).await);
    assert_ok!(
        db.statement(
            "CREATE TABLE it_zero_dates (d DATE, dt DATETIME, ts TIMESTAMP NULL)",
            (),
        )
        .await
    );
    assert_ok!(
        db.insert(
            "INSERT INTO it_zero_dates (d, dt, ts) VALUES (?, ?, ?)",
            bindings!["0000-00-00", "0000-00-00 00:00:00", "0000-00-00 00:00:00"],
        )
        .await
    );

    let rows = db
        .query("SELECT d, dt, ts FROM it_zero_dates", ())
        .await
        .expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("d"), Some(&json!("0000-00-00")));
    assert_eq!(rows[0].get("dt"), Some(&json!("0000-00-00 00:00:00")));
    assert_eq!(rows[0].get("ts"), Some(&json!("0000-00-00 00:00:00")));
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_int_and_string_bindings_keep_their_kind() {
    let mut db = connect_test_db().await;

    let row = db
        .query_one("SELECT ? AS a, ? AS b, ? AS c", bindings![10, "abc", None::<i64>])
        .await
        .expect("query_one")
        .expect("row");

    assert_eq!(row.get("a"), Some(&json!(10)));
    assert_eq!(row.get("b"), Some(&json!("abc")));
    assert_eq!(row.get("c"), Some(&json!(null)));
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_session_settings_applied() {
    let mut config = test_config();
    config.options.timezone = Some("+03:00".into());

    let mut db = Database::connect(&config).await.expect("connect");
    let row = db
        .query_one(
            "SELECT @@session.time_zone AS tz, @@session.character_set_client AS cs",
            (),
        )
        .await
        .expect("query_one")
        .expect("row");

    assert_eq!(row.get("tz"), Some(&json!("+03:00")));
    let charset = row.get("cs").and_then(|v| v.as_str()).unwrap_or_default();
    assert!(charset.starts_with("utf8"), "unexpected charset {charset}");

    db.close().await.expect("close");
}

#[tokio::test]
#[ignore] // Requires MySQL running
async fn test_bad_credentials_are_build_failure() {
    let config = ConnectionConfig {
        password: "definitely-not-the-password".into(),
        ..test_config()
    };

    let err = assert_err!(Database::connect(&config).await);
    assert!(err.is_build_failure());
}
