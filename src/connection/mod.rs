//! Connection management
//!
//! This module handles:
//! * Connection configuration and session defaults
//! * Session-setup statements (database, charset/collation, time zone)
//! * The owned driver connection and its execute/fetch primitives

mod config;
mod conn;
mod session;

pub use config::{
    ConnectionConfig, ConnectionConfigBuilder, SessionOptions, DEFAULT_CHARSET,
    DEFAULT_COLLATION, DEFAULT_PORT,
};
pub use conn::{Connection, Credentials};
pub use session::{session_statements, SessionStatement};
