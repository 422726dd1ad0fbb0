//! Client API
//!
//! [`Database`] is the entry point: it owns one connection and exposes
//! `query`, `query_one`, `insert`, `update`, `delete` and `statement`.

mod database;
mod dsn;

pub use database::Database;
pub use dsn::Dsn;
