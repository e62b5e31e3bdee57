//! Runner trait
//!
//! Everything the advisor learns from the server goes through one
//! operation: run a p4 command and get back its tagged records. Swapping
//! the runner is all a test needs to do to fake the server.

use anyhow::Result;
use std::collections::BTreeMap;

/// One tagged output record, field name to value
pub type Record = BTreeMap<String, String>;

/// Field set on records that describe a failure
pub const CODE_FIELD: &str = "code";
/// Value of `code` for failures
pub const CODE_ERROR: &str = "error";
/// Field holding the failure text
pub const DATA_FIELD: &str = "data";

/// Trait for anything that can run p4 commands.
///
/// Implementations return `Err` only when the command could not be run at
/// all. Server-side failures come back as records with `code: error`.
#[async_trait::async_trait]
pub trait P4Runner: Send + Sync {
    /// Run `p4 <args>` and collect its records in output order
    async fn run(&self, args: &[&str]) -> Result<Vec<Record>>;
}

/// Build a record from field pairs
pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Build an error record carrying `data`
pub fn error_record(data: impl Into<String>) -> Record {
    record([(CODE_FIELD, CODE_ERROR.to_string()), (DATA_FIELD, data.into())])
}

/// Whether a record reports a failure
pub fn is_error(record: &Record) -> bool {
    record.get(CODE_FIELD).map(String::as_str) == Some(CODE_ERROR)
}
