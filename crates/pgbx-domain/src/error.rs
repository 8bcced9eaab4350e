//! Error handling types
//!
//! One enum covers every failure the exporter can report. Whether an error is
//! fatal is decided by where it is returned, not by its variant: value
//! coercion failures travel inside successful conversion results, while
//! structural and query failures are returned as `Err`.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PgBouncer exporter
#[derive(Error, Debug)]
pub enum Error {
    /// A single cell could not be turned into a number
    #[error("unexpected value in {namespace}.{column}: {value}")]
    ValueCoercion {
        /// Status namespace the cell belongs to
        namespace: String,
        /// Column (or key, for key-value namespaces) that failed
        column: String,
        /// Debug rendering of the offending cell
        value: String,
    },

    /// A key-value row does not have the `(key, value, ...)` shape
    #[error("malformed row in {namespace}: {message}")]
    RowShape {
        /// Status namespace being converted
        namespace: String,
        /// Description of the violated shape assumption
        message: String,
    },

    /// The status command could not be issued
    #[error("error running SHOW {namespace}: {message}")]
    StatusQuery {
        /// Status namespace being queried
        namespace: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The column list of a status result could not be read
    #[error("error retrieving column list for {namespace}: {message}")]
    ColumnIntrospection {
        /// Status namespace being queried
        namespace: String,
        /// Description of the failure
        message: String,
    },

    /// The proxied service did not answer the liveness probe
    #[error("pgbouncer unavailable: {message}")]
    Unavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The static schema is inconsistent (programmer error, startup only)
    #[error("invalid metric schema: {message}")]
    Schema {
        /// Description of the inconsistency
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Metrics registry or descriptor error
    #[error("Exporter error: {message}")]
    Exporter {
        /// Description of the exporter error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Scrape error creation methods
impl Error {
    /// Create a value coercion error
    pub fn value_coercion<N, C, V>(namespace: N, column: C, value: &V) -> Self
    where
        N: Into<String>,
        C: Into<String>,
        V: std::fmt::Debug + ?Sized,
    {
        Self::ValueCoercion {
            namespace: namespace.into(),
            column: column.into(),
            value: format!("{value:?}"),
        }
    }

    /// Create a row shape error
    pub fn row_shape<N: Into<String>, S: Into<String>>(namespace: N, message: S) -> Self {
        Self::RowShape {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// Create a status query error
    pub fn status_query<N: Into<String>, S: Into<String>>(namespace: N, message: S) -> Self {
        Self::StatusQuery {
            namespace: namespace.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a status query error with source
    pub fn status_query_with_source<N, S, E>(namespace: N, message: S, source: E) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StatusQuery {
            namespace: namespace.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a column introspection error
    pub fn column_introspection<N: Into<String>, S: Into<String>>(
        namespace: N,
        message: S,
    ) -> Self {
        Self::ColumnIntrospection {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// Create a liveness error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a liveness error with source
    pub fn unavailable_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Startup error creation methods
impl Error {
    /// Create a schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an exporter error
    pub fn exporter<S: Into<String>>(message: S) -> Self {
        Self::Exporter {
            message: message.into(),
            source: None,
        }
    }

    /// Create an exporter error with source
    pub fn exporter_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Exporter {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
