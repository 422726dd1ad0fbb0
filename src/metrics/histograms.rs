//! Histogram helpers

use super::labels;

/// Wall-clock duration of one operation
pub fn statement_duration(operation: &'static str, duration_ms: u64) {
    ::metrics::histogram!(labels::STATEMENT_DURATION_MS, "operation" => operation)
        .record(duration_ms as f64);
}

/// Number of rows a fetch returned
pub fn rows_fetched(operation: &'static str, rows: usize) {
    ::metrics::histogram!(labels::ROWS_FETCHED, "operation" => operation).record(rows as f64);
}
