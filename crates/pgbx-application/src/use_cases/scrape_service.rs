//! Scrape orchestrator
//!
//! One poll = liveness probe, then one `SHOW` per namespace in compiled
//! order, every row fed through the namespace's converter. The health state
//! lives behind a mutex that is held for the entire poll, so concurrent
//! collection requests run strictly one after another and never see a
//! half-updated poll.
//!
//! ## Failure handling
//!
//! | Failure | Effect |
//! |---------|--------|
//! | liveness probe | `up = 0`, poll ends, no namespace is queried |
//! | status query / column list | poll ends; observations so far are kept |
//! | malformed key-value row | rest of that namespace skipped, poll continues |
//! | single value | that value skipped, counted |

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use pgbx_domain::error::{Error, Result};
use pgbx_domain::ports::SharedStatusSource;
use pgbx_domain::value_objects::{NamespaceMap, Observation, ScrapeHealth, ScrapeOutcome};
use tracing::{debug, error, info, warn};

use crate::domain_services::converters::convert;

/// Polls the proxied service and owns the exporter health state
pub struct ScrapeService {
    source: SharedStatusSource,
    namespaces: Vec<NamespaceMap>,
    health: Mutex<ScrapeHealth>,
}

impl ScrapeService {
    /// Create a service over compiled namespace maps
    pub fn new(source: SharedStatusSource, namespaces: Vec<NamespaceMap>) -> Self {
        Self {
            source,
            namespaces,
            health: Mutex::new(ScrapeHealth::default()),
        }
    }

    /// Compiled namespace maps, in scrape order
    pub fn namespaces(&self) -> &[NamespaceMap] {
        &self.namespaces
    }

    /// Health gauges as left by the last completed poll
    ///
    /// Waits for an in-flight poll to finish.
    pub fn health(&self) -> ScrapeHealth {
        *self.health.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one poll
    ///
    /// Never fails: fatal problems are reported in
    /// [`ScrapeOutcome::fatal_error`] and in the health gauges, and the next
    /// call starts from a clean slate.
    pub fn scrape(&self) -> ScrapeOutcome {
        let mut health = self.health.lock().unwrap_or_else(PoisonError::into_inner);
        let started = Instant::now();
        debug!("Starting scrape");

        health.total_scrapes += 1;
        health.last_error_count = 0;

        if let Err(e) = self.source.ping() {
            error!(error = %e, "error pinging pgbouncer");
            health.up = false;
            health.last_error_count = 1;
            health.last_duration_seconds = started.elapsed().as_secs_f64();
            return ScrapeOutcome {
                up: false,
                non_fatal_errors: Vec::new(),
                fatal_error: None,
                duration: started.elapsed(),
                observations: Vec::new(),
                health: *health,
            };
        }
        debug!("Backend is up, proceeding with scrape");
        health.up = true;

        let mut observations = Vec::new();
        let mut non_fatal_errors = Vec::new();
        let mut fatal_error = None;
        for map in &self.namespaces {
            if let Err(e) = self.scrape_namespace(map, &mut observations, &mut non_fatal_errors) {
                error!(namespace = map.namespace(), error = %e, "scrape aborted");
                fatal_error = Some(e);
                break;
            }
        }

        let duration = started.elapsed();
        health.last_error_count =
            non_fatal_errors.len() as u64 + u64::from(fatal_error.is_some());
        health.last_duration_seconds = duration.as_secs_f64();
        info!(
            duration_seconds = health.last_duration_seconds,
            observations = observations.len(),
            errors = health.last_error_count,
            "Ending scrape"
        );

        ScrapeOutcome {
            up: true,
            non_fatal_errors,
            fatal_error,
            duration,
            observations,
            health: *health,
        }
    }

    /// Query one namespace and convert its rows
    ///
    /// Only query and column list failures are returned; everything else is
    /// pushed to `errors` and logged.
    fn scrape_namespace(
        &self,
        map: &NamespaceMap,
        observations: &mut Vec<Observation>,
        errors: &mut Vec<Error>,
    ) -> Result<()> {
        let table = self.source.query(map.namespace())?;
        debug!(
            namespace = map.namespace(),
            rows = table.row_count(),
            "status query returned"
        );

        for row in table.rows() {
            match convert(map, row) {
                Ok(conversion) => {
                    observations.extend(conversion.observations);
                    for e in conversion.errors {
                        warn!(namespace = map.namespace(), error = %e, "skipping value");
                        errors.push(e);
                    }
                }
                Err(e) => {
                    error!(namespace = map.namespace(), error = %e, "skipping remaining rows");
                    errors.push(e);
                    break;
                }
            }
        }
        Ok(())
    }
}
