//! Database implementation

use super::dsn::Dsn;
use crate::connection::{Connection, ConnectionConfig, Credentials, SessionOptions};
use crate::metrics::labels;
use crate::params::{BindValue, IntoBindings};
use crate::row::Row;
use crate::Result;
use std::future::Future;
use std::time::Instant;

/// A single MySQL connection with parameterized-query helpers
///
/// Construction opens the connection and configures the session; if any step
/// fails no `Database` is returned. The connection is released when the value
/// is dropped or [`close`](Database::close)d.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Connect with default port and session options
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> simple_mysql::Result<()> {
    /// use simple_mysql::Database;
    ///
    /// let db = Database::new("localhost", "app", "u", "p").await?;
    /// assert_eq!(db.dsn().to_string(), "mysql:host=localhost;dbname=app;port=3306");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::connect(&ConnectionConfig::new(host, database, username, password)).await
    }

    /// Connect using a full configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> simple_mysql::Result<()> {
    /// use simple_mysql::{ConnectionConfig, Database};
    ///
    /// let config = ConnectionConfig::builder("localhost", "app", "u", "p")
    ///     .charset("utf8mb4")
    ///     .collation("utf8mb4_unicode_ci")
    ///     .timezone("+00:00")
    ///     .build();
    ///
    /// let db = Database::connect(&config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let credentials = Credentials {
            username: &config.username,
            password: &config.password,
        };
        let conn = Connection::open(config.dsn(), credentials, &config.options).await?;
        Ok(Self { conn })
    }

    /// Connect using a DSN string
    ///
    /// A `charset` named in the DSN applies when `options` leaves it unset.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> simple_mysql::Result<()> {
    /// use simple_mysql::{Database, SessionOptions};
    ///
    /// let db = Database::connect_dsn(
    ///     "mysql:host=localhost;dbname=app;port=3306;charset=utf8mb4",
    ///     "u",
    ///     "p",
    ///     SessionOptions::default(),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect_dsn(
        dsn: &str,
        username: &str,
        password: &str,
        mut options: SessionOptions,
    ) -> Result<Self> {
        let dsn = Dsn::parse(dsn)?;
        if options.charset.is_none() {
            options.charset = dsn.charset.clone();
        }

        let credentials = Credentials { username, password };
        let conn = Connection::open(dsn, credentials, &options).await?;
        Ok(Self { conn })
    }

    /// DSN the connection was opened with
    pub fn dsn(&self) -> &Dsn {
        self.conn.dsn()
    }

    /// Run a query and return every row in server order
    ///
    /// An empty result is an empty vector, not an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(mut db: simple_mysql::Database) -> simple_mysql::Result<()> {
    /// let rows = db.query("SELECT id FROM users WHERE id = ?", [1]).await?;
    /// for row in &rows {
    ///     println!("{:?}", row.get("id"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query(&mut self, sql: &str, bindings: impl IntoBindings) -> Result<Vec<Row>> {
        let (sql, values) = prepare(labels::OP_QUERY, sql, bindings)?;
        let conn = &mut self.conn;

        let rows = instrumented(labels::OP_QUERY, &sql, values.len(), async {
            conn.fetch_all(&sql, values).await
        })
        .await?;

        crate::metrics::histograms::rows_fetched(labels::OP_QUERY, rows.len());
        tracing::debug!(rows = rows.len(), "query returned");
        Ok(rows)
    }

    /// Run a query and return only its first row
    ///
    /// Returns `None` when the query matches no rows.
    pub async fn query_one(
        &mut self,
        sql: &str,
        bindings: impl IntoBindings,
    ) -> Result<Option<Row>> {
        let (sql, values) = prepare(labels::OP_QUERY_ONE, sql, bindings)?;
        let conn = &mut self.conn;

        let row = instrumented(labels::OP_QUERY_ONE, &sql, values.len(), async {
            conn.fetch_optional(&sql, values).await
        })
        .await?;

        crate::metrics::histograms::rows_fetched(labels::OP_QUERY_ONE, usize::from(row.is_some()));
        Ok(row)
    }

    /// Execute an `INSERT`; same behavior as [`statement`](Database::statement)
    pub async fn insert(&mut self, sql: &str, bindings: impl IntoBindings) -> Result<bool> {
        self.run(labels::OP_INSERT, sql, bindings).await
    }

    /// Execute an `UPDATE`; same behavior as [`statement`](Database::statement)
    pub async fn update(&mut self, sql: &str, bindings: impl IntoBindings) -> Result<bool> {
        self.run(labels::OP_UPDATE, sql, bindings).await
    }

    /// Execute a `DELETE`; same behavior as [`statement`](Database::statement)
    pub async fn delete(&mut self, sql: &str, bindings: impl IntoBindings) -> Result<bool> {
        self.run(labels::OP_DELETE, sql, bindings).await
    }

    /// Execute any statement
    ///
    /// Returns `Ok(true)` once the driver reports the statement executed.
    /// Driver failures are returned as
    /// [`Error::QueryExecutionFailed`](crate::Error::QueryExecutionFailed).
    pub async fn statement(&mut self, sql: &str, bindings: impl IntoBindings) -> Result<bool> {
        self.run(labels::OP_STATEMENT, sql, bindings).await
    }

    /// Close the connection
    pub async fn close(self) -> Result<()> {
        self.conn.close().await
    }

    async fn run(
        &mut self,
        operation: &'static str,
        sql: &str,
        bindings: impl IntoBindings,
    ) -> Result<bool> {
        let (sql, values) = prepare(operation, sql, bindings)?;
        let conn = &mut self.conn;

        let result = instrumented(operation, &sql, values.len(), async {
            conn.execute(&sql, values).await
        })
        .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "statement executed");
        Ok(true)
    }
}

/// Resolve bindings against `sql`; a rejection counts as a failed `operation`
fn prepare(
    operation: &'static str,
    sql: &str,
    bindings: impl IntoBindings,
) -> Result<(String, Vec<BindValue>)> {
    bindings
        .into_bindings()
        .and_then(|bindings| bindings.resolve(sql))
        .map_err(|e| {
            tracing::debug!(operation, error = %e, "bindings rejected");
            crate::metrics::counters::statement_failed(operation, e.category());
            e
        })
}

/// Time `fut`, log it, and record success/failure metrics under `operation`
async fn instrumented<T>(
    operation: &'static str,
    sql: &str,
    params: usize,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tracing::debug!(operation, sql, params, "executing");
    let start = Instant::now();

    let result = fut.await;

    let elapsed = start.elapsed();
    crate::metrics::histograms::statement_duration(operation, elapsed.as_millis() as u64);
    match &result {
        Ok(_) => crate::metrics::counters::statement_executed(operation),
        Err(e) => {
            tracing::debug!(operation, error = %e, "statement failed");
            crate::metrics::counters::statement_failed(operation, e.category());
        }
    }
    tracing::debug!(operation, elapsed_ms = elapsed.as_millis() as u64, "finished");
    result
}
