//! simple-mysql
//!
//! A thin wrapper around a single MySQL connection. It builds a
//! `mysql:host=..;dbname=..;port=..` DSN, opens one connection, applies the
//! charset/collation/time-zone session settings, and exposes a handful of
//! parameterized-query helpers:
//!
//! * [`Database::query`] returns every row as a [`Row`]
//! * [`Database::query_one`] returns the first row, if any
//! * [`Database::insert`], [`Database::update`], [`Database::delete`] and
//!   [`Database::statement`] execute and report success
//!
//! Statement preparation, wire encoding and authentication are handled by the
//! underlying driver (`sqlx`).
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> simple_mysql::Result<()> {
//! use simple_mysql::{bindings, Database};
//!
//! let mut db = Database::new("localhost", "app", "u", "p").await?;
//!
//! let users = db.query("SELECT id FROM users WHERE id = ?", [1]).await?;
//! assert_eq!(users[0].get("id"), Some(&serde_json::json!(1)));
//!
//! db.insert(
//!     "INSERT INTO users (id, name) VALUES (:id, :name)",
//!     bindings! { "id" => 2, "name" => "abc" },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! A [`Database`] owns exactly one connection. Every operation takes
//! `&mut self` and completes before returning; share an instance across tasks
//! only behind a lock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod connection;
pub mod error;
pub mod metrics;
pub mod params;
pub mod row;

pub use client::{Database, Dsn};
pub use connection::{ConnectionConfig, ConnectionConfigBuilder, SessionOptions};
pub use error::{Error, Result};
pub use params::{BindValue, Bindings, IntoBindings, ParamKind};
pub use row::Row;
