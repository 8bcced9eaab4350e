//! Status source port

use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::StatusTable;

/// Request/response access to the admin console
///
/// Implementations are blocking and must bound every call with their own
/// network timeout; the scrape engine adds none.
pub trait StatusSource: Send + Sync {
    /// Run the cheapest possible query to prove the service answers
    ///
    /// Failure is reported as [`Error::Unavailable`](crate::error::Error::Unavailable).
    fn ping(&self) -> Result<()>;

    /// Run `SHOW <namespace>;` and return every row
    ///
    /// Fails with `StatusQuery` when the command cannot be issued and with
    /// `ColumnIntrospection` when the column list cannot be read.
    fn query(&self, namespace: &str) -> Result<StatusTable>;
}

/// Shared status source handle
pub type SharedStatusSource = Arc<dyn StatusSource>;

/// Text of the status command for a namespace
pub fn status_command(namespace: &str) -> String {
    format!("SHOW {namespace};")
}
