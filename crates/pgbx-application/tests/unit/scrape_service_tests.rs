//! Scrape orchestrator tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use pgbx_application::domain_services::build_metric_maps;
use pgbx_application::use_cases::ScrapeService;
use pgbx_domain::error::{Error, Result};
use pgbx_domain::ports::StatusSource;
use pgbx_domain::schema::SchemaRegistry;
use pgbx_domain::value_objects::{CellValue, ColumnSet, StatusTable};

/// Scripted status source
#[derive(Default)]
struct FakeSource {
    down: AtomicBool,
    tables: HashMap<&'static str, StatusTable>,
    failing: Option<&'static str>,
    queries: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeSource {
    fn with_table(mut self, namespace: &'static str, columns: &[&str], rows: Vec<Vec<CellValue>>) -> Self {
        self.tables
            .insert(namespace, StatusTable::new(ColumnSet::new(columns.iter().copied()), rows));
        self
    }

    fn queried(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl StatusSource for FakeSource {
    fn ping(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(Error::unavailable("connection refused"));
        }
        Ok(())
    }

    fn query(&self, namespace: &str) -> Result<StatusTable> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.queries.lock().unwrap().push(namespace.to_string());
        if self.failing == Some(namespace) {
            return Err(Error::status_query(namespace, "server closed the connection"));
        }
        Ok(self.tables.get(namespace).cloned().unwrap_or_default())
    }
}

fn service(source: Arc<FakeSource>) -> ScrapeService {
    let maps = build_metric_maps("pgbouncer", &SchemaRegistry::pgbouncer()).unwrap();
    ScrapeService::new(source, maps)
}

fn healthy_source() -> FakeSource {
    FakeSource::default()
        .with_table(
            "lists",
            &["databases", "users"],
            vec![vec![CellValue::Integer(2), CellValue::Integer(1)]],
        )
        .with_table(
            "pools",
            &["database", "user", "cl_active", "pool_mode"],
            vec![
                vec!["db1".into(), "app".into(), CellValue::Integer(3), "session".into()],
                vec!["db2".into(), "app".into(), CellValue::Integer(0), "transaction".into()],
            ],
        )
        .with_table(
            "config",
            &["key", "value", "default", "changeable"],
            vec![
                vec!["max_client_conn".into(), "100".into(), "100".into(), "yes".into()],
                vec!["logfile".into(), "".into(), "".into(), "yes".into()],
            ],
        )
}

#[test]
fn test_successful_poll() {
    let source = Arc::new(healthy_source());
    let service = service(Arc::clone(&source));

    let outcome = service.scrape();

    assert!(outcome.is_success());
    assert!(outcome.non_fatal_errors.is_empty());
    assert_eq!(outcome.observations.len(), 5);
    assert_eq!(outcome.health.total_scrapes, 1);
    assert_eq!(outcome.health.last_error_count, 0);
    assert!(outcome.health.up);
    assert_eq!(source.queried(), ["databases", "lists", "pools", "stats", "config"]);
}

#[test]
fn test_liveness_failure_skips_namespaces() {
    let source = Arc::new(healthy_source());
    source.down.store(true, Ordering::SeqCst);
    let service = service(Arc::clone(&source));

    let outcome = service.scrape();

    assert!(!outcome.up);
    assert!(outcome.observations.is_empty());
    assert_eq!(outcome.health.last_error_count, 1);
    assert!(source.queried().is_empty());

    // next poll starts clean once the backend is back
    source.down.store(false, Ordering::SeqCst);
    let outcome = service.scrape();
    assert!(outcome.is_success());
    assert_eq!(outcome.health.total_scrapes, 2);
    assert_eq!(outcome.health.last_error_count, 0);
}

#[test]
fn test_query_failure_keeps_collected_observations() {
    let mut source = healthy_source();
    source.failing = Some("stats");
    let source = Arc::new(source);
    let service = service(Arc::clone(&source));

    let outcome = service.scrape();

    assert!(outcome.up);
    assert!(matches!(outcome.fatal_error, Some(Error::StatusQuery { .. })));
    // lists and pools were collected before stats failed
    assert_eq!(outcome.observations.len(), 4);
    assert_eq!(outcome.health.last_error_count, 1);
    assert!(!source.queried().contains(&"config".to_string()));
}

#[test]
fn test_malformed_key_value_row_stops_namespace_only() {
    let source = Arc::new(healthy_source().with_table(
        "config",
        &["key"],
        vec![vec!["max_client_conn".into()], vec!["listen_backlog".into()]],
    ));
    let service = service(source);

    let outcome = service.scrape();

    assert!(outcome.fatal_error.is_none());
    assert_eq!(outcome.non_fatal_errors.len(), 1);
    assert!(matches!(outcome.non_fatal_errors[0], Error::RowShape { .. }));
    assert_eq!(outcome.health.last_error_count, 1);
}

#[test]
fn test_value_errors_counted() {
    let source = Arc::new(healthy_source().with_table(
        "lists",
        &["databases", "users", "pools"],
        vec![vec!["x".into(), CellValue::Boolean(true), CellValue::Integer(1)]],
    ));
    let service = service(source);

    let outcome = service.scrape();

    assert!(outcome.is_success());
    assert_eq!(outcome.non_fatal_errors.len(), 2);
    assert_eq!(service.health().last_error_count, 2);
}

#[test]
fn test_total_scrapes_accumulates() {
    let service = service(Arc::new(healthy_source()));

    for _ in 0..3 {
        service.scrape();
    }

    assert_eq!(service.health().total_scrapes, 3);
}

#[test]
fn test_concurrent_polls_are_serialised() {
    let mut source = healthy_source();
    source.delay = Some(Duration::from_millis(5));
    let source = Arc::new(source);
    let service = Arc::new(service(Arc::clone(&source)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.scrape().observations.len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }

    assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(service.health().total_scrapes, 4);
}
