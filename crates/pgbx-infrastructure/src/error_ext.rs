//! Context helpers for foreign errors
//!
//! Driver, pool, figment and client-library errors are folded into the
//! domain [`Error`]. The variant depends on which boundary failed, and the
//! original error stays reachable through `source()`.

use pgbx_domain::error::{Error, Result};
use std::fmt::Display;

/// Attach a message and pick the domain error variant
///
/// ```ignore
/// use pgbx_infrastructure::ErrorContext;
///
/// let config: postgres::Config = dsn.parse().config_context("Invalid connection string")?;
/// let conn = pool.get().db_context("Cannot reach pgbouncer")?;
/// ```
pub trait ErrorContext<T>: Sized {
    /// Wrap as [`Error::Internal`]; the source is flattened into the message
    fn context(self, context: impl Display) -> Result<T>;

    /// Wrap as [`Error::Configuration`]
    fn config_context(self, context: impl Display) -> Result<T>;

    /// Wrap as [`Error::Unavailable`]: the admin console could not be reached
    fn db_context(self, context: impl Display) -> Result<T>;

    /// Wrap as [`Error::Exporter`]: the metrics client library refused something
    fn exporter_context(self, context: impl Display) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Display) -> Result<T> {
        self.map_err(|err| Error::internal(format!("{context}: {err}")))
    }

    fn config_context(self, context: impl Display) -> Result<T> {
        wrap(self, context, Error::configuration_with_source)
    }

    fn db_context(self, context: impl Display) -> Result<T> {
        wrap(self, context, Error::unavailable_with_source)
    }

    fn exporter_context(self, context: impl Display) -> Result<T> {
        wrap(self, context, Error::exporter_with_source)
    }
}

fn wrap<T, E>(
    result: std::result::Result<T, E>,
    context: impl Display,
    variant: fn(String, E) -> Error,
) -> Result<T>
where
    E: std::error::Error,
{
    result.map_err(|err| {
        let message = format!("{context}: {err}");
        variant(message, err)
    })
}
