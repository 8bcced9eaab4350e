//! Domain layer constants

/// Default metric name prefix
pub const DEFAULT_METRIC_PREFIX: &str = "pgbouncer";

/// Multiplier turning microsecond values into seconds
pub const MICROSECONDS_TO_SECONDS: f64 = 1e-6;

/// Health metric: liveness of the proxied service
pub const UP_METRIC: &str = "up";

/// Health metric: wall time of the last poll
pub const LAST_SCRAPE_DURATION_METRIC: &str = "last_scrape_duration_seconds";

/// Health metric: poll attempts since startup
pub const SCRAPES_TOTAL_METRIC: &str = "scrapes_total";

/// Health metric: errors recorded by the last poll
pub const LAST_SCRAPE_ERROR_METRIC: &str = "last_scrape_error";
