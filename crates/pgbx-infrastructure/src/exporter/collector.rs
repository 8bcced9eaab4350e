//! Prometheus collector
//!
//! Each `collect` call runs exactly one poll through the scrape service and
//! turns the observations into metric families, followed by the four
//! exporter health metrics. Descriptors come from the compiled namespace
//! maps, so registration never touches the network.

use std::collections::HashMap;
use std::sync::Arc;

use pgbx_application::use_cases::ScrapeService;
use pgbx_domain::constants::{
    LAST_SCRAPE_DURATION_METRIC, LAST_SCRAPE_ERROR_METRIC, SCRAPES_TOTAL_METRIC, UP_METRIC,
};
use pgbx_domain::error::Result;
use pgbx_domain::value_objects::{CompiledMetric, Observation, ScrapeHealth, ValueKind};
use prometheus::core::{Collector, Desc};
use prometheus::{Registry, proto};
use tracing::info;

use crate::error_ext::ErrorContext;

const UP_HELP: &str = "Was the PgBouncer instance query successful?";
const LAST_SCRAPE_DURATION_HELP: &str = "Duration of the last scrape of metrics from PgBouncer.";
const SCRAPES_TOTAL_HELP: &str = "Total number of times PgBouncer has been scraped for metrics.";
const LAST_SCRAPE_ERROR_HELP: &str = "Whether the last scrape of metrics from PgBouncer resulted in an error (1 for error, 0 for success).";

/// Name, help and type of one health metric
struct HealthMetric {
    name: String,
    help: &'static str,
    kind: ValueKind,
}

/// Collector exposing PgBouncer status through the scrape service
pub struct PgBouncerCollector {
    service: Arc<ScrapeService>,
    descs: Vec<Desc>,
    health: [HealthMetric; 4],
}

impl PgBouncerCollector {
    /// Create a collector; fails if a descriptor is rejected by the client library
    pub fn new(prefix: &str, service: Arc<ScrapeService>) -> Result<Self> {
        let health = [
            HealthMetric::new(prefix, UP_METRIC, UP_HELP, ValueKind::Gauge),
            HealthMetric::new(
                prefix,
                LAST_SCRAPE_DURATION_METRIC,
                LAST_SCRAPE_DURATION_HELP,
                ValueKind::Gauge,
            ),
            HealthMetric::new(prefix, SCRAPES_TOTAL_METRIC, SCRAPES_TOTAL_HELP, ValueKind::Counter),
            HealthMetric::new(
                prefix,
                LAST_SCRAPE_ERROR_METRIC,
                LAST_SCRAPE_ERROR_HELP,
                ValueKind::Gauge,
            ),
        ];

        let mut metrics: Vec<&Arc<CompiledMetric>> = service
            .namespaces()
            .iter()
            .flat_map(|namespace| namespace.metrics())
            .collect();
        metrics.sort_by(|a, b| a.descriptor.fq_name.cmp(&b.descriptor.fq_name));

        let mut descs = Vec::with_capacity(metrics.len() + health.len());
        for metric in metrics {
            let descriptor = &metric.descriptor;
            descs.push(
                Desc::new(
                    descriptor.fq_name.clone(),
                    descriptor.help.clone(),
                    descriptor.label_names.to_vec(),
                    HashMap::new(),
                )
                .exporter_context(format!("Invalid descriptor {}", descriptor.fq_name))?,
            );
        }
        for metric in &health {
            descs.push(
                Desc::new(
                    metric.name.clone(),
                    metric.help.to_string(),
                    Vec::new(),
                    HashMap::new(),
                )
                .exporter_context(format!("Invalid descriptor {}", metric.name))?,
            );
        }

        Ok(Self {
            service,
            descs,
            health,
        })
    }

    fn health_families(&self, health: &ScrapeHealth) -> Vec<proto::MetricFamily> {
        let values = [
            if health.up { 1.0 } else { 0.0 },
            health.last_duration_seconds,
            health.total_scrapes as f64,
            health.last_error_count as f64,
        ];
        self.health
            .iter()
            .zip(values)
            .map(|(metric, value)| {
                family(
                    metric.name.clone(),
                    metric.help.to_string(),
                    metric.kind,
                    vec![sample(metric.kind, value, &[], &[])],
                )
            })
            .collect()
    }
}

impl HealthMetric {
    fn new(prefix: &str, suffix: &str, help: &'static str, kind: ValueKind) -> Self {
        Self {
            name: format!("{prefix}_{suffix}"),
            help,
            kind,
        }
    }
}

impl Collector for PgBouncerCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<proto::MetricFamily> {
        let outcome = self.service.scrape();
        let mut families = observation_families(&outcome.observations);
        families.extend(self.health_families(&outcome.health));
        families
    }
}

/// Group observations into one family per descriptor, in first-seen order
fn observation_families(observations: &[Observation]) -> Vec<proto::MetricFamily> {
    let mut order: Vec<&CompiledMetric> = Vec::new();
    let mut samples: HashMap<&str, Vec<proto::Metric>> = HashMap::new();

    for observation in observations {
        let metric = &*observation.metric;
        let descriptor = &metric.descriptor;
        samples
            .entry(descriptor.fq_name.as_str())
            .or_insert_with(|| {
                order.push(metric);
                Vec::new()
            })
            .push(sample(
                metric.value_kind,
                observation.value,
                &descriptor.label_names,
                &observation.label_values,
            ));
    }

    order
        .into_iter()
        .map(|metric| {
            let descriptor = &metric.descriptor;
            family(
                descriptor.fq_name.clone(),
                descriptor.help.clone(),
                metric.value_kind,
                samples
                    .remove(descriptor.fq_name.as_str())
                    .unwrap_or_default(),
            )
        })
        .collect()
}

fn family(
    name: String,
    help: String,
    kind: ValueKind,
    metrics: Vec<proto::Metric>,
) -> proto::MetricFamily {
    let mut family = proto::MetricFamily::default();
    family.set_name(name);
    family.set_help(help);
    family.set_field_type(match kind {
        ValueKind::Counter => proto::MetricType::COUNTER,
        ValueKind::Gauge => proto::MetricType::GAUGE,
    });
    family.set_metric(metrics);
    family
}

/// One sample; label pairs are sorted by name as the client libraries emit them
fn sample(kind: ValueKind, value: f64, names: &[String], values: &[String]) -> proto::Metric {
    let mut pairs: Vec<(&String, &String)> = names.iter().zip(values).collect();
    pairs.sort_by_key(|(name, _)| *name);
    let labels = pairs
        .into_iter()
        .map(|(name, value)| {
            let mut pair = proto::LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value(value.clone());
            pair
        })
        .collect();

    let mut metric = proto::Metric::from_label(labels);
    match kind {
        ValueKind::Counter => {
            let mut counter = proto::Counter::default();
            counter.set_value(value);
            metric.set_counter(counter);
        }
        ValueKind::Gauge => {
            let mut gauge = proto::Gauge::default();
            gauge.set_value(value);
            metric.set_gauge(gauge);
        }
    }
    metric
}

/// Registry holding only the PgBouncer collector
pub fn build_registry(collector: PgBouncerCollector) -> Result<Registry> {
    let registry = Registry::new();
    let descriptors = collector.descs.len();
    registry
        .register(Box::new(collector))
        .exporter_context("Failed to register PgBouncer collector")?;
    info!(descriptors, "registered PgBouncer collector");
    Ok(registry)
}
