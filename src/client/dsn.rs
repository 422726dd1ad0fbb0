//! DSN building and parsing
//!
//! Format: `mysql:host=<host>;dbname=<database>[;port=<port>][;unix_socket=<path>][;charset=<charset>]`
//!
//! Keys are `;`-separated `key=value` pairs after the `mysql:` prefix.
//! Unknown keys are ignored.

use crate::{Error, Result};
use sqlx::mysql::MySqlConnectOptions;

const PREFIX: &str = "mysql:";

/// Parsed or constructed data source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    /// Server host
    pub host: String,
    /// Database name
    pub database: String,
    /// Port, emitted only when present
    pub port: Option<u16>,
    /// Unix socket path
    pub unix_socket: Option<String>,
    /// Character set named in the DSN
    pub charset: Option<String>,
}

impl Dsn {
    /// DSN for `host` and `database`, without a port
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            port: None,
            unix_socket: None,
            charset: None,
        }
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Parse a DSN string
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_mysql::Dsn;
    ///
    /// let dsn = Dsn::parse("mysql:host=localhost;dbname=app;port=3306").unwrap();
    /// assert_eq!(dsn.host, "localhost");
    /// assert_eq!(dsn.database, "app");
    /// assert_eq!(dsn.port, Some(3306));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| Error::Config("DSN must start with mysql:".into()))?;

        let mut dsn = Self::new("", "");

        for pair in rest.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                Error::Config(format!("DSN segment '{}' is not key=value", pair))
            })?;

            match key.trim() {
                "host" => dsn.host = value.to_string(),
                "dbname" => dsn.database = value.to_string(),
                "port" => {
                    let port = value
                        .parse()
                        .map_err(|_| Error::Config(format!("invalid port '{}'", value)))?;
                    dsn.port = Some(port);
                }
                "unix_socket" => dsn.unix_socket = Some(value.to_string()),
                "charset" => dsn.charset = Some(value.to_string()),
                other => tracing::debug!("ignoring unknown DSN key '{}'", other),
            }
        }

        Ok(dsn)
    }

    /// Driver connect options for this DSN
    ///
    /// Empty host, database and password are left to the driver's defaults.
    /// A socket path takes precedence over host/port. The driver's own session
    /// time zone is cleared: only a configured `timezone` changes it.
    pub fn to_connect_options(&self, username: &str, password: &str) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .username(username)
            .pipes_as_concat(false)
            .timezone(None::<String>);

        if !password.is_empty() {
            options = options.password(password);
        }

        if let Some(ref socket) = self.unix_socket {
            options = options.socket(socket);
        } else if !self.host.is_empty() {
            options = options.host(&self.host);
        }

        if let Some(port) = self.port {
            options = options.port(port);
        }

        if !self.database.is_empty() {
            options = options.database(&self.database);
        }

        options
    }
}

impl std::fmt::Display for Dsn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}host={};dbname={}", PREFIX, self.host, self.database)?;
        if let Some(port) = self.port {
            write!(f, ";port={}", port)?;
        }
        if let Some(ref socket) = self.unix_socket {
            write!(f, ";unix_socket={}", socket)?;
        }
        if let Some(ref charset) = self.charset {
            write!(f, ";charset={}", charset)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Dsn {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
