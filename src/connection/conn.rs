//! Core connection type

use super::config::SessionOptions;
use super::session::session_statements;
use crate::client::Dsn;
use crate::metrics::labels;
use crate::params::{BindValue, ParamKind};
use crate::row::Row;
use crate::{Error, Result};
use futures::TryStreamExt;
use sqlx::database::HasArguments;
use sqlx::encode::{Encode, IsNull};
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection, MySqlQueryResult, MySqlTypeInfo};
use sqlx::query::Query;
use sqlx::{ConnectOptions, Type};
use tracing::Instrument;

/// Credentials presented when opening the connection
#[derive(Clone)]
pub struct Credentials<'a> {
    /// Username
    pub username: &'a str,
    /// Password (empty for none)
    pub password: &'a str,
}

/// An open MySQL connection with its session configured
///
/// Owns the driver connection; dropping it closes the socket.
pub struct Connection {
    inner: MySqlConnection,
    dsn: Dsn,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").field("dsn", &self.dsn).finish()
    }
}

impl Connection {
    /// Open a connection and run the session-setup statements
    ///
    /// Any failure, whether connecting or running a setup statement, drops
    /// the partially-opened connection and returns
    /// [`Error::DatabaseBuildFailed`].
    pub async fn open(
        dsn: Dsn,
        credentials: Credentials<'_>,
        options: &SessionOptions,
    ) -> Result<Self> {
        let span = tracing::info_span!("startup", host = %dsn.host, database = %dsn.database);

        async move {
            let connect_options = dsn.to_connect_options(credentials.username, credentials.password);

            let mut inner = match connect_options.connect().await {
                Ok(conn) => {
                    crate::metrics::counters::connection_opened(labels::RESULT_OK);
                    conn
                }
                Err(e) => {
                    tracing::debug!("connect failed: {}", e);
                    crate::metrics::counters::connection_opened(labels::RESULT_ERROR);
                    crate::metrics::counters::build_failed(labels::STAGE_CONNECT);
                    return Err(Error::build_failed(e));
                }
            };

            for statement in session_statements(&dsn.database, options) {
                tracing::debug!(stage = statement.stage, sql = %statement.sql, "session setup");
                if let Err(e) = sqlx::Executor::execute(&mut inner, statement.sql.as_str()).await {
                    tracing::debug!("session setup failed at {}: {}", statement.stage, e);
                    crate::metrics::counters::build_failed(statement.stage);
                    // `inner` is dropped here, releasing the socket
                    return Err(Error::build_failed(e));
                }
            }

            tracing::info!("startup complete");
            Ok(Self { inner, dsn })
        }
        .instrument(span)
        .await
    }

    /// DSN this connection was opened with
    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }

    /// Run a prepared statement and decode every row
    pub async fn fetch_all(&mut self, sql: &str, values: Vec<BindValue>) -> Result<Vec<Row>> {
        let query = bind_values(sqlx::query(sql), values);
        let mut stream = query.fetch(&mut self.inner);

        let mut rows = Vec::new();
        while let Some(row) = stream.try_next().await? {
            rows.push(Row::from_mysql(&row)?);
        }
        Ok(rows)
    }

    /// Run a prepared statement and decode the first row, if any
    pub async fn fetch_optional(
        &mut self,
        sql: &str,
        values: Vec<BindValue>,
    ) -> Result<Option<Row>> {
        let query = bind_values(sqlx::query(sql), values);
        let row = query.fetch_optional(&mut self.inner).await?;
        row.as_ref().map(Row::from_mysql).transpose()
    }

    /// Run a prepared statement that returns no rows
    pub async fn execute(&mut self, sql: &str, values: Vec<BindValue>) -> Result<MySqlQueryResult> {
        let query = bind_values(sqlx::query(sql), values);
        Ok(query.execute(&mut self.inner).await?)
    }

    /// Close the connection
    pub async fn close(self) -> Result<()> {
        sqlx::Connection::close(self.inner).await?;
        Ok(())
    }
}

/// Bind each value as the parameter kind its variant names
fn bind_values<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    values: Vec<BindValue>,
) -> Query<'q, MySql, MySqlArguments> {
    values.into_iter().enumerate().fold(query, |query, (index, value)| {
        tracing::trace!(index, kind = %value.kind(), wire = value.kind().wire_type(), "bind");
        query.bind(value)
    })
}

/// Driver type announced for a parameter kind
fn driver_type(kind: ParamKind) -> MySqlTypeInfo {
    match kind {
        ParamKind::Int => <i64 as Type<MySql>>::type_info(),
        // NULL travels in the null bitmap; the announced type is unused
        ParamKind::Str | ParamKind::Null => <str as Type<MySql>>::type_info(),
    }
}

impl Type<MySql> for BindValue {
    fn type_info() -> MySqlTypeInfo {
        driver_type(ParamKind::Str)
    }
}

impl<'q> Encode<'q, MySql> for BindValue {
    fn encode_by_ref(&self, buf: &mut <MySql as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
        match self {
            BindValue::Int(v) => <i64 as Encode<'q, MySql>>::encode_by_ref(v, buf),
            BindValue::Str(v) => <String as Encode<'q, MySql>>::encode_by_ref(v, buf),
            BindValue::Null => IsNull::Yes,
        }
    }

    fn produces(&self) -> Option<MySqlTypeInfo> {
        Some(driver_type(self.kind()))
    }

    fn size_hint(&self) -> usize {
        match self {
            BindValue::Int(_) => 8,
            BindValue::Str(v) => v.len() + 9,
            BindValue::Null => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sqlx::TypeInfo;

    fn encoded(value: &BindValue) -> (Vec<u8>, bool) {
        let mut buf = Vec::new();
        let is_null = matches!(
            <BindValue as Encode<'_, MySql>>::encode_by_ref(value, &mut buf),
            IsNull::Yes
        );
        (buf, is_null)
    }

    #[test]
    fn test_int_binds_as_longlong() {
        let value = BindValue::Int(10);
        assert_eq!(
            <BindValue as Encode<'_, MySql>>::produces(&value),
            Some(<i64 as Type<MySql>>::type_info())
        );
        assert_eq!(driver_type(value.kind()).name(), "BIGINT");
        assert_eq!(encoded(&value), (10i64.to_le_bytes().to_vec(), false));
    }

    #[test]
    fn test_str_binds_as_var_string() {
        let value = BindValue::Str("abc".into());
        assert_eq!(
            <BindValue as Encode<'_, MySql>>::produces(&value),
            Some(<str as Type<MySql>>::type_info())
        );
        // length-encoded string
        assert_eq!(encoded(&value), (vec![3, b'a', b'b', b'c'], false));
    }

    #[test]
    fn test_null_binds_as_null() {
        assert_eq!(encoded(&BindValue::Null), (Vec::new(), true));
    }

    #[test]
    fn test_open_failure_records_connect_stage() {
        let recorder = crate::metrics::capture::CaptureRecorder::default();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let result = ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(Connection::open(
                Dsn::new("127.0.0.1", "app").with_port(1),
                Credentials {
                    username: "u",
                    password: "p",
                },
                &SessionOptions::default(),
            ))
        });

        assert!(matches!(result, Err(Error::DatabaseBuildFailed(_))));
        assert_eq!(
            recorder
                .find(labels::BUILD_FAILURES_TOTAL, "stage", labels::STAGE_CONNECT)
                .len(),
            1
        );
        assert_eq!(
            recorder
                .find(labels::CONNECTIONS_TOTAL, "result", labels::RESULT_ERROR)
                .len(),
            1
        );
    }

    #[test]
    fn test_connection_is_send() {
        fn require_send<T: Send>() {}
        require_send::<Connection>();
    }
}
