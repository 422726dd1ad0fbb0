//! Error types for simple-mysql

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Opening the connection or running a session-setup statement failed
    #[error("database build failed: {0}")]
    DatabaseBuildFailed(String),

    /// The driver failed to prepare or execute a statement
    #[error("query execution failed: {0}")]
    QueryExecutionFailed(#[from] sqlx::Error),

    /// A bound value has a type with no parameter kind
    #[error("unsupported binding type for parameter {param}: {kind}")]
    UnsupportedBindingType {
        /// Parameter position (1-based) or name
        param: String,
        /// Type of the rejected value
        kind: &'static str,
    },

    /// Bindings do not line up with the placeholders in the SQL text
    #[error("parameter error: {0}")]
    Parameter(String),

    /// Invalid configuration or DSN
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A column value could not be decoded into a row field
    #[error("row decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Short static label for logs and metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::DatabaseBuildFailed(_) => "build",
            Error::QueryExecutionFailed(_) => "execution",
            Error::UnsupportedBindingType { .. } => "binding",
            Error::Parameter(_) => "parameter",
            Error::Config(_) => "config",
            Error::Decode(_) => "decode",
        }
    }

    /// Whether the error happened while building the connection
    pub fn is_build_failure(&self) -> bool {
        matches!(self, Error::DatabaseBuildFailed(_))
    }

    pub(crate) fn build_failed(err: impl std::fmt::Display) -> Self {
        Error::DatabaseBuildFailed(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
