//! Construction failures
//!
//! These tests need no running server: they point the client at endpoints
//! that refuse connections.

use simple_mysql::{ConnectionConfig, Database, Error, SessionOptions};
use tokio_test::assert_err;

#[tokio::test]
async fn test_unreachable_host_is_build_failure() {
    // Port 1 on loopback refuses connections
    let config = ConnectionConfig::builder("127.0.0.1", "app", "u", "p")
        .port(1)
        .build();

    let err = assert_err!(Database::connect(&config).await);
    assert!(err.is_build_failure(), "unexpected error: {err:?}");
    assert!(err.to_string().starts_with("database build failed: "));
}

#[tokio::test]
async fn test_unreachable_dsn_is_build_failure() {
    let result = Database::connect_dsn(
        "mysql:host=127.0.0.1;dbname=app;port=1",
        "u",
        "p",
        SessionOptions::default(),
    )
    .await;

    let err = assert_err!(result);
    assert!(matches!(err, Error::DatabaseBuildFailed(_)));
}

#[tokio::test]
async fn test_missing_socket_is_build_failure() {
    let config = ConnectionConfig::builder("localhost", "app", "u", "p")
        .unix_socket("/nonexistent/simple-mysql-test.sock")
        .build();

    let err = assert_err!(Database::connect(&config).await);
    assert!(err.is_build_failure());
}

#[tokio::test]
async fn test_malformed_dsn_fails_before_connecting() {
    let result =
        Database::connect_dsn("postgres://localhost/app", "u", "p", SessionOptions::default())
            .await;

    let err = assert_err!(result);
    assert!(matches!(err, Error::Config(_)));
}
