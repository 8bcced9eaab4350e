//! PgBouncer admin console adapter
//!
//! Implements [`StatusSource`] over an r2d2 pool holding at most one
//! connection. The pool is built without connecting, so the exporter starts
//! (and reports `up = 0`) while PgBouncer is down.
//!
//! The admin console only speaks the simple query protocol, where every
//! value arrives as text or NULL.

use pgbx_domain::error::{Error, Result};
use pgbx_domain::ports::{StatusSource, status_command};
use pgbx_domain::value_objects::{CellValue, ColumnSet, StatusTable};
use r2d2::{Pool, PooledConnection};
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::{Config, NoTls, SimpleQueryMessage};
use tracing::debug;

use crate::config::PgBouncerConfig;
use crate::constants::{ADMIN_POOL_MAX_SIZE, LIVENESS_COMMAND};
use crate::error_ext::ErrorContext;

type AdminConnection = PooledConnection<PostgresConnectionManager<NoTls>>;

/// Status source backed by the PgBouncer admin console
#[derive(Clone)]
pub struct PgBouncerSource {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl PgBouncerSource {
    /// Create a source without connecting
    ///
    /// Fails only if the connection string cannot be parsed.
    pub fn new(config: &PgBouncerConfig) -> Result<Self> {
        let timeout = config.connect_timeout();
        let pg_config = admin_config(config)?;

        let pool = Pool::builder()
            .max_size(ADMIN_POOL_MAX_SIZE)
            .min_idle(Some(0))
            .connection_timeout(timeout)
            // the r2d2_postgres validity check is an empty query, which the admin console rejects
            .test_on_check_out(false)
            .build_unchecked(PostgresConnectionManager::new(pg_config, NoTls));

        Ok(Self { pool })
    }

    fn connection(&self) -> Result<AdminConnection> {
        self.pool.get().db_context("Cannot reach pgbouncer")
    }
}

impl StatusSource for PgBouncerSource {
    fn ping(&self) -> Result<()> {
        let mut conn = self.connection()?;
        conn.simple_query(LIVENESS_COMMAND)
            .db_context("Liveness probe failed")?;
        Ok(())
    }

    fn query(&self, namespace: &str) -> Result<StatusTable> {
        let mut conn = self
            .connection()
            .map_err(|e| Error::status_query(namespace, e.to_string()))?;
        let messages = conn
            .simple_query(&status_command(namespace))
            .map_err(|e| Error::status_query_with_source(namespace, e.to_string(), e))?;

        let mut table = TableBuilder::new(namespace);
        for message in &messages {
            if let SimpleQueryMessage::Row(row) = message {
                let names = row.columns().iter().map(|column| column.name());
                let values = (0..row.len()).map(|i| CellValue::from(row.get(i))).collect();
                table.push(names, values)?;
            }
        }
        let table = table.finish();
        debug!(namespace, rows = table.row_count(), "fetched status rows");
        Ok(table)
    }
}

/// Connection settings for the admin console
///
/// The timeout bounds connection setup, and a peer that stops acknowledging
/// traffic (keepalive probes included) is dropped after the same interval.
/// A server that keeps the socket alive but never answers a query is not
/// bounded here.
fn admin_config(config: &PgBouncerConfig) -> Result<Config> {
    let timeout = config.connect_timeout();
    let mut pg_config: Config = config
        .connection_string
        .parse()
        .config_context("Invalid pgbouncer connection string")?;
    pg_config
        .connect_timeout(timeout)
        .keepalives(true)
        .keepalives_idle(timeout)
        .tcp_user_timeout(timeout);
    Ok(pg_config)
}

/// Accumulates rows that must all share the first row's column list
struct TableBuilder<'a> {
    namespace: &'a str,
    columns: Option<ColumnSet>,
    rows: Vec<Vec<CellValue>>,
}

impl<'a> TableBuilder<'a> {
    fn new(namespace: &'a str) -> Self {
        Self {
            namespace,
            columns: None,
            rows: Vec::new(),
        }
    }

    fn push<'n>(
        &mut self,
        names: impl Iterator<Item = &'n str>,
        values: Vec<CellValue>,
    ) -> Result<()> {
        match &self.columns {
            None => self.columns = Some(ColumnSet::new(names)),
            Some(columns) => {
                if !names.eq(columns.names().iter().map(String::as_str)) {
                    return Err(Error::column_introspection(
                        self.namespace,
                        "column list changed between rows",
                    ));
                }
            }
        }
        self.rows.push(values);
        Ok(())
    }

    fn finish(self) -> StatusTable {
        StatusTable::new(self.columns.unwrap_or_default(), self.rows)
    }
}
