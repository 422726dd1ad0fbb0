//! Counter helpers

use super::labels;

/// A connection attempt finished (`result` is `ok` or `error`)
pub fn connection_opened(result: &'static str) {
    ::metrics::counter!(labels::CONNECTIONS_TOTAL, "result" => result).increment(1);
}

/// Construction aborted at `stage`
pub fn build_failed(stage: &'static str) {
    ::metrics::counter!(labels::BUILD_FAILURES_TOTAL, "stage" => stage).increment(1);
}

/// A statement ran successfully
pub fn statement_executed(operation: &'static str) {
    ::metrics::counter!(labels::STATEMENTS_TOTAL, "operation" => operation).increment(1);
}

/// A statement failed
pub fn statement_failed(operation: &'static str, category: &'static str) {
    ::metrics::counter!(
        labels::STATEMENT_ERRORS_TOTAL,
        "operation" => operation,
        "category" => category
    )
    .increment(1);
}
