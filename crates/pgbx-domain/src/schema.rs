//! Static status schema
//!
//! The column vocabulary of the PgBouncer admin console. Names and exported
//! metric names are the compatibility contract with existing dashboards, so
//! they must not be edited casually.

use crate::value_objects::{ColumnSpec, NamespaceSchema};

/// The two schema tables handed to the metric map builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRegistry {
    /// Namespaces returning one row per entity
    pub row_groups: &'static [NamespaceSchema],
    /// Namespaces returning `(key, value, ...)` rows
    pub key_value_groups: &'static [NamespaceSchema],
}

impl SchemaRegistry {
    /// Registry over arbitrary tables
    pub const fn new(
        row_groups: &'static [NamespaceSchema],
        key_value_groups: &'static [NamespaceSchema],
    ) -> Self {
        Self {
            row_groups,
            key_value_groups,
        }
    }

    /// The PgBouncer admin console schema
    pub const fn pgbouncer() -> Self {
        Self::new(ROW_GROUP_SCHEMAS, KEY_VALUE_SCHEMAS)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::pgbouncer()
    }
}

/// Row-group namespaces, in scrape order
pub const ROW_GROUP_SCHEMAS: &[NamespaceSchema] = &[
    NamespaceSchema {
        name: "databases",
        columns: DATABASES_COLUMNS,
    },
    NamespaceSchema {
        name: "lists",
        columns: LISTS_COLUMNS,
    },
    NamespaceSchema {
        name: "pools",
        columns: POOLS_COLUMNS,
    },
    NamespaceSchema {
        name: "stats",
        columns: STATS_COLUMNS,
    },
];

/// Key-value namespaces, in scrape order
pub const KEY_VALUE_SCHEMAS: &[NamespaceSchema] = &[NamespaceSchema {
    name: "config",
    columns: CONFIG_KEYS,
}];

const DATABASES_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::label("name"),
    ColumnSpec::label("host"),
    ColumnSpec::label("port"),
    ColumnSpec::label("database"),
    ColumnSpec::label("force_user"),
    ColumnSpec::gauge(
        "pool_size",
        "Maximum number of connection per pool for backend connections",
    ),
    ColumnSpec::gauge(
        "reserve_pool",
        "Number of extra connections by which the pool_size can be exceeded temporarily",
    )
    .exported_as("reserve_pool_size"),
    ColumnSpec::label("pool_mode"),
    ColumnSpec::gauge("max_connections", "Maximum number of client connections allowed"),
    ColumnSpec::gauge("current_connections", "Current number of client connections"),
    ColumnSpec::gauge(
        "paused",
        "Boolean indicating whether a pgbouncer PAUSE is currently active for this database",
    ),
    ColumnSpec::gauge(
        "disabled",
        "Boolean indicating whether a pgbouncer DISABLE is currently active for this database",
    ),
];

const LISTS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::gauge("databases", "Count of databases"),
    ColumnSpec::gauge("users", "Count of users"),
    ColumnSpec::gauge("pools", "Count of pools"),
    ColumnSpec::gauge("free_clients", "Count of free clients"),
    ColumnSpec::gauge("used_clients", "Count of used clients"),
    ColumnSpec::gauge("login_clients", "Count of clients in login state"),
    ColumnSpec::gauge("free_servers", "Count of free servers"),
    ColumnSpec::gauge("used_servers", "Count of used servers"),
];

const POOLS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::label("database"),
    ColumnSpec::label("user"),
    ColumnSpec::gauge(
        "cl_active",
        "Client connections linked to server connection and able to process queries, shown as connection",
    ),
    ColumnSpec::gauge(
        "cl_waiting",
        "Client connections waiting on a server connection, shown as connection",
    ),
    ColumnSpec::gauge(
        "sv_active",
        "Server connections linked to a client connection, shown as connection",
    ),
    ColumnSpec::gauge(
        "sv_idle",
        "Server connections idle and ready for a client query, shown as connection",
    ),
    ColumnSpec::gauge(
        "sv_used",
        "Server connections idle more than server_check_delay, needing server_check_query, shown as connection",
    ),
    ColumnSpec::gauge(
        "sv_tested",
        "Server connections currently running either server_reset_query or server_check_query, shown as connection",
    ),
    ColumnSpec::gauge(
        "sv_login",
        "Server connections currently in the process of logging in, shown as connection",
    ),
    ColumnSpec::gauge(
        "maxwait",
        "Age of oldest unserved client connection, shown as second",
    )
    .exported_as("maxwait_seconds"),
    ColumnSpec::label("pool_mode"),
];

const STATS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::label("database"),
    ColumnSpec::gauge(
        "avg_query_count",
        "Average queries per second in last stat period",
    )
    .exported_as("avg_queries_per_second"),
    ColumnSpec::scaled_gauge(
        "avg_query",
        "The average query duration, shown as microsecond",
    )
    .exported_as("avg_query_duration_microseconds"),
    ColumnSpec::scaled_gauge("avg_query_time", "Average query time in microseconds")
        .exported_as("avg_query_time_microseconds"),
    ColumnSpec::gauge(
        "avg_recv",
        "Average received (from clients) bytes per second",
    )
    .exported_as("avg_data_recv_bytes_per_second"),
    ColumnSpec::gauge(
        "avg_req",
        "The average number of requests per second in last stat period, shown as request/second",
    ),
    ColumnSpec::gauge("avg_sent", "Average sent (to clients) bytes per second"),
    ColumnSpec::scaled_gauge(
        "avg_wait_time",
        "Time spent by clients waiting for a server in microseconds (average per second)",
    )
    .exported_as("avg_wait_time_microseconds"),
    ColumnSpec::gauge(
        "avg_xact_count",
        "Average transactions per second in last stat period",
    ),
    ColumnSpec::scaled_gauge(
        "avg_xact_time",
        "Average transaction duration in microseconds",
    )
    .exported_as("avg_xact_time_microseconds"),
    ColumnSpec::gauge(
        "bytes_received_per_second",
        "The total network traffic received, shown as byte/second",
    )
    .exported_as("bytes_received_per_second_total"),
    ColumnSpec::gauge(
        "bytes_sent_per_second",
        "The total network traffic sent, shown as byte/second",
    )
    .exported_as("bytes_sent_per_second_total"),
    ColumnSpec::gauge("total_query_count", "Total number of SQL queries pooled")
        .exported_as("query_count_total"),
    ColumnSpec::scaled_gauge(
        "total_query_time",
        "Total number of microseconds spent by pgbouncer when actively connected to PostgreSQL, executing queries",
    )
    .exported_as("query_time_microseconds_total"),
    ColumnSpec::gauge(
        "total_received",
        "Total volume in bytes of network traffic received by pgbouncer, shown as bytes",
    )
    .exported_as("received_bytes_total"),
    ColumnSpec::gauge(
        "total_requests",
        "Total number of SQL requests pooled by pgbouncer, shown as requests",
    )
    .exported_as("requests_total"),
    ColumnSpec::gauge(
        "total_sent",
        "Total volume in bytes of network traffic sent by pgbouncer, shown as bytes",
    )
    .exported_as("sent_bytes_total"),
    ColumnSpec::scaled_gauge(
        "total_wait_time",
        "Time spent by clients waiting for a server in microseconds",
    )
    .exported_as("wait_time_microseconds_total"),
    ColumnSpec::gauge("total_xact_count", "Total number of SQL transactions pooled")
        .exported_as("xact_count_total"),
    ColumnSpec::scaled_gauge(
        "total_xact_time",
        "Total number of microseconds spent by pgbouncer when connected to PostgreSQL in a transaction, either idle in transaction or executing queries",
    )
    .exported_as("xact_time_microseconds_total"),
];

const CONFIG_KEYS: &[ColumnSpec] = &[
    ColumnSpec::counter(
        "listen_backlog",
        "Maximum number of backlogged listen connections before further connection attempts are dropped",
    ),
    ColumnSpec::gauge("max_client_conn", "Maximum number of client connections allowed"),
    ColumnSpec::gauge(
        "default_pool_size",
        "The default for how many server connections to allow per user/database pair",
    ),
    ColumnSpec::gauge(
        "min_pool_size",
        "Mininum number of backends a pool will always retain.",
    ),
    ColumnSpec::gauge(
        "reserve_pool_size",
        "How many additional connections to allow to a pool once it's crossed it's maximum",
    ),
    ColumnSpec::gauge(
        "reserve_pool_timeout",
        "If a client has not been serviced in this many seconds, pgbouncer enables use of additional connections from reserve pool.",
    )
    .exported_as("reserve_pool_timeout_seconds"),
    ColumnSpec::gauge(
        "max_db_connections",
        "Server level maximum connections enforced for a given db, irregardless of pool limits",
    ),
    ColumnSpec::gauge(
        "max_user_connections",
        "Maximum number of connections a user can open irregardless of pool limits",
    ),
    ColumnSpec::gauge(
        "autodb_idle_timeout",
        "Unused pools created via '*' are reclaimed after this interval",
    )
    .exported_as("autodb_idle_timeout_seconds"),
    ColumnSpec::gauge(
        "server_reset_query_always",
        "Boolean indicating whether or not server_reset_query is enforced for all pooling modes, or just session",
    ),
    ColumnSpec::gauge(
        "server_check_delay",
        "How long to keep released connections available for immediate re-use, without running sanity-check queries on it. If 0 then the query is ran always.",
    )
    .exported_as("server_check_delay_seconds"),
    ColumnSpec::gauge(
        "query_timeout",
        "Maximum time that a query can run for before being cancelled.",
    )
    .exported_as("query_timeout_seconds"),
    ColumnSpec::gauge(
        "query_wait_timeout",
        "Maximum time that a query can wait to be executed before being cancelled.",
    )
    .exported_as("query_wait_timeout_seconds"),
    ColumnSpec::gauge(
        "client_idle_timeout",
        "Client connections idling longer than this many seconds are closed",
    )
    .exported_as("client_idle_timeout_seconds"),
    ColumnSpec::gauge(
        "client_login_timeout",
        "Maximum time in seconds for a client to either login, or be disconnected",
    )
    .exported_as("client_login_timeout_seconds"),
    ColumnSpec::gauge(
        "idle_transaction_timeout",
        "If client has been in 'idle in transaction' state longer than this amount in seconds, it will be disconnected.",
    )
    .exported_as("idle_transaction_timeout_seconds"),
    ColumnSpec::gauge(
        "server_lifetime",
        "The pooler will close an unused server connection that has been connected longer than this many seconds",
    )
    .exported_as("server_lifetime_seconds"),
    ColumnSpec::gauge(
        "server_idle_timeout",
        "If a server connection has been idle more than this many seconds it will be dropped",
    )
    .exported_as("server_idle_timeout_seconds"),
    ColumnSpec::gauge(
        "server_connect_timeout",
        "Maximum time allowed for connecting and logging into a backend server",
    )
    .exported_as("server_connect_timeout_seconds"),
    ColumnSpec::gauge(
        "server_login_retry",
        "If connecting to a backend failed, this is the wait interval in seconds before retrying",
    )
    .exported_as("server_login_retry_seconds"),
    ColumnSpec::gauge(
        "server_round_robin",
        "Boolean; if 1, pgbouncer uses backends in a round robin fashion.  If 0, it uses LIFO to minimize connectivity to backends",
    ),
    ColumnSpec::gauge(
        "suspend_timeout",
        "Timeout for how long pgbouncer waits for buffer flushes before killing connections during pgbouncer admin SHUTDOWN and SUSPEND invocations.",
    )
    .exported_as("suspend_timeout_seconds"),
    ColumnSpec::counter(
        "disable_pqexec",
        "Boolean; 1 means pgbouncer enforce Simple Query Protocol; 0 means it allows multiple queries in a single packet",
    ),
    ColumnSpec::gauge(
        "dns_max_ttl",
        "Irregardless of DNS TTL, this is the TTL that pgbouncer enforces for dns lookups it does for backends",
    ),
    ColumnSpec::gauge(
        "dns_nxdomain_ttl",
        "Irregardless of DNS TTL, this is the period enforced for negative DNS answers",
    ),
    ColumnSpec::gauge(
        "dns_zone_check_period",
        "Period to check if zone serial has changed.",
    )
    .exported_as("dns_zone_check_period_seconds"),
    ColumnSpec::gauge(
        "max_packet_size",
        "Maximum packet size for postgresql packets that pgbouncer will relay to backends",
    )
    .exported_as("max_packet_size_bytes"),
    ColumnSpec::counter("pkt_buf", "Internal buffer size for packets.  See docs")
        .exported_as("pkt_buf_bytes"),
    ColumnSpec::gauge(
        "sbuf_loopcnt",
        "How many results to process for a given connection's packet results before switching to others to ensure fairness.  See docs.",
    ),
    ColumnSpec::gauge("tcp_defer_accept", "Configurable for TCP_DEFER_ACCEPT"),
    ColumnSpec::gauge(
        "tcp_socket_buffer",
        "Configurable for tcp socket buffering; 0 is kernel managed",
    )
    .exported_as("tcp_socket_buffer_bytes"),
    ColumnSpec::gauge(
        "tcpkeepalive",
        "Boolean; if 1, tcp keepalive is enabled w/ OS defaults.  If 0, disabled.",
    ),
    ColumnSpec::gauge("tcp_keepcnt", "See TCP documentation for this field"),
    ColumnSpec::gauge("tcp_keepidle", "See TCP documentation for this field"),
    ColumnSpec::gauge("tcp_keepintvl", "See TCP documentation for this field"),
    ColumnSpec::gauge(
        "verbose",
        "If log verbosity is increased.  Only relevant as a metric if log volume begins exceeding log consumption",
    ),
    ColumnSpec::gauge(
        "stats_period",
        "Periodicity in seconds of pgbouncer recalculating internal stats.",
    )
    .exported_as("stats_period_seconds"),
    ColumnSpec::gauge("log_connections", "Whether connections are logged or not."),
    ColumnSpec::gauge(
        "log_disconnections",
        "Whether connection disconnects are logged.",
    ),
    ColumnSpec::gauge("log_pooler_errors", "Whether pooler errors are logged or not"),
    ColumnSpec::gauge(
        "application_name_add_host",
        "Whether pgbouncer add the client host address and port to the application name setting set on connection start or not",
    ),
];
