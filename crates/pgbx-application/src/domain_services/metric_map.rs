//! Metric map builder
//!
//! Compiles the static schema into per-namespace descriptor sets. Runs once
//! at startup; any error here is a schema bug and must stop the process
//! before it starts serving.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use pgbx_domain::constants::MICROSECONDS_TO_SECONDS;
use pgbx_domain::error::{Error, Result};
use pgbx_domain::schema::SchemaRegistry;
use pgbx_domain::value_objects::{
    ColumnRole, ColumnSpec, CompiledMetric, ConversionStrategy, MetricDescriptor, NamespaceMap,
    NamespaceSchema, ValueKind,
};
use tracing::debug;

/// Compile every namespace of the registry
///
/// Row-group namespaces come first, then key-value namespaces, each in
/// declaration order. That order is the scrape order.
pub fn build_metric_maps(prefix: &str, registry: &SchemaRegistry) -> Result<Vec<NamespaceMap>> {
    let mut fq_names = HashSet::new();
    let row_groups = registry
        .row_groups
        .iter()
        .map(|schema| (schema, ConversionStrategy::Row));
    let key_value_groups = registry
        .key_value_groups
        .iter()
        .map(|schema| (schema, ConversionStrategy::KeyValue));

    row_groups
        .chain(key_value_groups)
        .map(|(schema, strategy)| compile_namespace(prefix, schema, strategy, &mut fq_names))
        .collect()
}

fn compile_namespace(
    prefix: &str,
    schema: &NamespaceSchema,
    strategy: ConversionStrategy,
    fq_names: &mut HashSet<String>,
) -> Result<NamespaceMap> {
    let mut seen = HashSet::with_capacity(schema.columns.len());
    if let Some(duplicate) = schema.columns.iter().find(|c| !seen.insert(c.name)) {
        return Err(Error::schema(format!(
            "column {} declared twice in namespace {}",
            duplicate.name, schema.name
        )));
    }

    let label_names: Vec<String> = schema
        .columns
        .iter()
        .filter(|c| c.is_label())
        .map(|c| c.name.to_string())
        .collect();
    if strategy == ConversionStrategy::KeyValue && !label_names.is_empty() {
        return Err(Error::schema(format!(
            "key-value namespace {} cannot declare label columns",
            schema.name
        )));
    }
    let shared_labels: Arc<[String]> = label_names.clone().into();

    let mut metrics = HashMap::new();
    for column in schema.columns.iter().filter(|c| !c.is_label()) {
        let metric = compile_column(prefix, schema.name, column, &shared_labels);
        if !fq_names.insert(metric.descriptor.fq_name.clone()) {
            return Err(Error::schema(format!(
                "metric {} produced twice (namespace {}, column {})",
                metric.descriptor.fq_name, schema.name, column.name
            )));
        }
        metrics.insert(column.name.to_string(), Arc::new(metric));
    }

    debug!(
        namespace = schema.name,
        labels = label_names.len(),
        metrics = metrics.len(),
        "compiled namespace"
    );
    Ok(NamespaceMap::new(schema.name, label_names, metrics, strategy))
}

fn compile_column(
    prefix: &str,
    namespace: &str,
    column: &ColumnSpec,
    label_names: &Arc<[String]>,
) -> CompiledMetric {
    let (value_kind, scale_factor) = match column.role {
        ColumnRole::Counter => (ValueKind::Counter, 1.0),
        ColumnRole::ScaledGauge => (ValueKind::Gauge, MICROSECONDS_TO_SECONDS),
        ColumnRole::Gauge | ColumnRole::Label => (ValueKind::Gauge, 1.0),
    };

    CompiledMetric {
        column: column.name.to_string(),
        descriptor: MetricDescriptor {
            fq_name: format!("{prefix}_{namespace}_{}", column.output_name()),
            help: column.description.to_string(),
            label_names: Arc::clone(label_names),
        },
        value_kind,
        scale_factor,
    }
}
