//! Session-setup statements issued once the connection is open

use super::config::SessionOptions;
use crate::metrics::labels;

/// One setup statement and the startup stage it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatement {
    /// Stage label (`use_database`, `set_names`, `time_zone`)
    pub stage: &'static str,
    /// Statement text
    pub sql: String,
}

/// Statements to run after connecting, in order:
///
/// 1. `` use `<database>`; `` when `database` is non-empty
/// 2. `set names '<charset>' collate '<collation>'`
/// 3. `set time_zone="<timezone>"` when a time zone is configured
pub fn session_statements(database: &str, options: &SessionOptions) -> Vec<SessionStatement> {
    let mut statements = Vec::with_capacity(3);

    if !database.is_empty() {
        statements.push(SessionStatement {
            stage: labels::STAGE_USE_DATABASE,
            sql: format!("use `{}`;", database.replace('`', "``")),
        });
    }

    statements.push(SessionStatement {
        stage: labels::STAGE_SET_NAMES,
        sql: format!(
            "set names '{}' collate '{}'",
            options.charset().replace('\'', "''"),
            options.collation().replace('\'', "''")
        ),
    });

    if let Some(timezone) = options.timezone() {
        statements.push(SessionStatement {
            stage: labels::STAGE_TIME_ZONE,
            sql: format!("set time_zone=\"{}\"", timezone.replace('"', "\"\"")),
        });
    }

    statements
}
