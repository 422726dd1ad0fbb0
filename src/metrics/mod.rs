//! Metrics for connections and statements
//!
//! Recorded through the `metrics` facade; install any recorder to collect them.
//! Without a recorder every call is a no-op.

pub mod counters;
pub mod histograms;
pub mod labels;

#[cfg(test)]
pub(crate) mod capture;

#[cfg(test)]
mod tests {
    use super::capture::CaptureRecorder;
    use super::*;

    #[test]
    fn test_helpers_record_names_and_labels() {
        let recorder = CaptureRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            counters::connection_opened(labels::RESULT_OK);
            counters::build_failed(labels::STAGE_SET_NAMES);
            counters::statement_executed(labels::OP_INSERT);
            counters::statement_failed(labels::OP_QUERY, "parameter");
            histograms::statement_duration(labels::OP_QUERY, 12);
            histograms::rows_fetched(labels::OP_QUERY, 3);
        });

        assert_eq!(
            recorder.find(labels::CONNECTIONS_TOTAL, "result", "ok").len(),
            1
        );
        assert_eq!(
            recorder
                .find(labels::BUILD_FAILURES_TOTAL, "stage", "set_names")
                .len(),
            1
        );
        assert_eq!(
            recorder
                .find(labels::STATEMENTS_TOTAL, "operation", "insert")
                .len(),
            1
        );

        let errors = recorder.find(labels::STATEMENT_ERRORS_TOTAL, "category", "parameter");
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .labels
            .contains(&("operation".to_string(), "query".to_string())));

        let durations = recorder.named(labels::STATEMENT_DURATION_MS);
        assert_eq!(durations.len(), 1);
        assert_eq!(durations[0].value, 12.0);

        let rows = recorder.find(labels::ROWS_FETCHED, "operation", "query");
        assert_eq!(rows[0].value, 3.0);
    }
}
