//! Per-poll results and exporter self-health

use std::time::Duration;

use super::Observation;
use crate::error::Error;

/// Exporter health gauges
///
/// Counters accumulate across polls; everything else is overwritten by
/// each poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrapeHealth {
    /// Whether the liveness probe succeeded in the last poll
    pub up: bool,
    /// Wall time of the last poll in seconds
    pub last_duration_seconds: f64,
    /// Poll attempts since startup
    pub total_scrapes: u64,
    /// Errors recorded by the last poll
    pub last_error_count: u64,
}

/// Result of one poll
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Whether the proxied service answered the liveness probe
    pub up: bool,
    /// Per-value failures; reported and counted, never abort
    pub non_fatal_errors: Vec<Error>,
    /// Failure that ended the poll early
    pub fatal_error: Option<Error>,
    /// Wall time of the poll
    pub duration: Duration,
    /// Samples collected before the poll ended
    pub observations: Vec<Observation>,
    /// Health gauges as left by this poll
    pub health: ScrapeHealth,
}

impl ScrapeOutcome {
    /// Whether the poll ran to completion against a live service
    pub fn is_success(&self) -> bool {
        self.up && self.fatal_error.is_none()
    }
}
