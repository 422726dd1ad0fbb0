//! Metric names and label values

/// Connections opened, labelled by `result`
pub const CONNECTIONS_TOTAL: &str = "simple_mysql_connections_total";
/// Construction failures, labelled by `stage`
pub const BUILD_FAILURES_TOTAL: &str = "simple_mysql_build_failures_total";
/// Statements executed, labelled by `operation`
pub const STATEMENTS_TOTAL: &str = "simple_mysql_statements_total";
/// Statement failures, labelled by `operation` and `category`
pub const STATEMENT_ERRORS_TOTAL: &str = "simple_mysql_statement_errors_total";
/// Statement duration in milliseconds, labelled by `operation`
pub const STATEMENT_DURATION_MS: &str = "simple_mysql_statement_duration_ms";
/// Rows returned per fetch, labelled by `operation`
pub const ROWS_FETCHED: &str = "simple_mysql_rows_fetched";

/// `result` label value
pub const RESULT_OK: &str = "ok";
/// `result` label value
pub const RESULT_ERROR: &str = "error";

/// `stage` label value
pub const STAGE_CONNECT: &str = "connect";
/// `stage` label value
pub const STAGE_USE_DATABASE: &str = "use_database";
/// `stage` label value
pub const STAGE_SET_NAMES: &str = "set_names";
/// `stage` label value
pub const STAGE_TIME_ZONE: &str = "time_zone";

/// `operation` label value
pub const OP_QUERY: &str = "query";
/// `operation` label value
pub const OP_QUERY_ONE: &str = "query_one";
/// `operation` label value
pub const OP_INSERT: &str = "insert";
/// `operation` label value
pub const OP_UPDATE: &str = "update";
/// `operation` label value
pub const OP_DELETE: &str = "delete";
/// `operation` label value
pub const OP_STATEMENT: &str = "statement";
