//! Connection configuration

use crate::client::Dsn;
use serde::{Deserialize, Serialize};

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 3306;
/// Session character set used when none is configured
pub const DEFAULT_CHARSET: &str = "utf8";
/// Session collation used when none is configured
pub const DEFAULT_COLLATION: &str = "utf8_unicode_ci";

fn default_port() -> Option<u16> {
    Some(DEFAULT_PORT)
}

/// Session settings applied right after the connection opens
///
/// Unset fields fall back to [`DEFAULT_CHARSET`] and [`DEFAULT_COLLATION`].
/// No time-zone statement is issued unless `timezone` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Character set for `set names`
    #[serde(default)]
    pub charset: Option<String>,
    /// Collation for `set names`
    #[serde(default)]
    pub collation: Option<String>,
    /// Session time zone, e.g. `+00:00`
    #[serde(default)]
    pub timezone: Option<String>,
}

impl SessionOptions {
    /// Resolved character set
    pub fn charset(&self) -> &str {
        self.charset.as_deref().unwrap_or(DEFAULT_CHARSET)
    }

    /// Resolved collation
    pub fn collation(&self) -> &str {
        self.collation.as_deref().unwrap_or(DEFAULT_COLLATION)
    }

    /// Time zone, if one was configured
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }
}

/// Connection configuration
///
/// Use [`ConnectionConfig::new`] for the defaults (port 3306, charset `utf8`,
/// collation `utf8_unicode_ci`, no time zone) or
/// [`ConnectionConfig::builder`] to override them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server host
    pub host: String,
    /// Database name
    pub database: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Server port (default: 3306)
    #[serde(default = "default_port")]
    pub port: Option<u16>,
    /// Unix socket path, used instead of TCP when set
    #[serde(default)]
    pub unix_socket: Option<String>,
    /// Session settings
    #[serde(default)]
    pub options: SessionOptions,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("port", &self.port)
            .field("unix_socket", &self.unix_socket)
            .field("options", &self.options)
            .finish()
    }
}

impl ConnectionConfig {
    /// Create new configuration with defaults
    ///
    /// # Defaults
    ///
    /// - `port`: 3306
    /// - `unix_socket`: None
    /// - `options`: charset `utf8`, collation `utf8_unicode_ci`, no time zone
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
            port: default_port(),
            unix_socket: None,
            options: SessionOptions::default(),
        }
    }

    /// Create a builder for overriding port and session options
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_mysql::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::builder("localhost", "app", "u", "p")
    ///     .port(3307)
    ///     .charset("utf8mb4")
    ///     .collation("utf8mb4_unicode_ci")
    ///     .timezone("+00:00")
    ///     .build();
    ///
    /// assert_eq!(config.dsn().to_string(), "mysql:host=localhost;dbname=app;port=3307");
    /// ```
    pub fn builder(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            config: Self::new(host, database, username, password),
        }
    }

    /// The DSN this configuration connects with
    pub fn dsn(&self) -> Dsn {
        Dsn {
            host: self.host.clone(),
            database: self.database.clone(),
            port: self.port,
            unix_socket: self.unix_socket.clone(),
            charset: None,
        }
    }
}

/// Builder for [`ConnectionConfig`]
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = Some(port);
        self
    }

    /// Leave the port out of the DSN (the driver then uses its own default)
    pub fn no_port(mut self) -> Self {
        self.config.port = None;
        self
    }

    /// Connect through a Unix socket instead of TCP
    pub fn unix_socket(mut self, path: impl Into<String>) -> Self {
        self.config.unix_socket = Some(path.into());
        self
    }

    /// Set the session character set
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.config.options.charset = Some(charset.into());
        self
    }

    /// Set the session collation
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.config.options.collation = Some(collation.into());
        self
    }

    /// Set the session time zone
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.config.options.timezone = Some(timezone.into());
        self
    }

    /// Replace all session options at once
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.config.options = options;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConnectionConfig {
        self.config
    }
}
