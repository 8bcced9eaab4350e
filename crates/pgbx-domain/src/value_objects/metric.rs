//! Metric mapping value objects
//!
//! [`ColumnSpec`] is the hand-curated input, [`NamespaceMap`] the compiled
//! output the scrape path reads. Neither changes after startup.

use std::collections::HashMap;
use std::sync::Arc;

/// How a status column is exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Identifies the entity the row describes
    Label,
    /// Monotonic value
    Counter,
    /// Value that moves both ways
    Gauge,
    /// Gauge reported in microseconds, exported in seconds
    ScaledGauge,
}

/// Value Object: one column of the static schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name as returned by the admin console
    pub name: &'static str,
    /// Export role
    pub role: ColumnRole,
    /// Metric name override; the column name is used when absent
    pub exported_name: Option<&'static str>,
    /// Help text
    pub description: &'static str,
}

impl ColumnSpec {
    /// A label column
    pub const fn label(name: &'static str) -> Self {
        Self::new(name, ColumnRole::Label, "")
    }

    /// A counter column
    pub const fn counter(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnRole::Counter, description)
    }

    /// A gauge column
    pub const fn gauge(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnRole::Gauge, description)
    }

    /// A microsecond gauge column exported in seconds
    pub const fn scaled_gauge(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnRole::ScaledGauge, description)
    }

    const fn new(name: &'static str, role: ColumnRole, description: &'static str) -> Self {
        Self {
            name,
            role,
            exported_name: None,
            description,
        }
    }

    /// Override the exported metric name
    pub const fn exported_as(self, exported_name: &'static str) -> Self {
        Self {
            exported_name: Some(exported_name),
            ..self
        }
    }

    /// Name used in the output descriptor
    pub fn output_name(&self) -> &'static str {
        self.exported_name.unwrap_or(self.name)
    }

    /// Whether the column is a label
    pub fn is_label(&self) -> bool {
        self.role == ColumnRole::Label
    }
}

/// Value Object: the declared columns of one status namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceSchema {
    /// Namespace name, also the `SHOW` argument
    pub name: &'static str,
    /// Declared columns (or keys, for key-value namespaces)
    pub columns: &'static [ColumnSpec],
}

/// Metric type of an emitted observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Exported as a counter
    Counter,
    /// Exported as a gauge
    Gauge,
}

/// Stable identity of an exported metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Fully qualified name: `prefix_namespace_metric`
    pub fq_name: String,
    /// Help text
    pub help: String,
    /// Label names in the order every observation supplies values
    pub label_names: Arc<[String]>,
}

/// Value Object: compiled mapping for one value column
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMetric {
    /// Source column (or key) name
    pub column: String,
    /// Output descriptor
    pub descriptor: MetricDescriptor,
    /// Counter or gauge semantics
    pub value_kind: ValueKind,
    /// Multiplier applied to every coerced value
    pub scale_factor: f64,
}

/// Which converter walks the rows of a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// One entity per row, some columns are labels
    Row,
    /// `(key, value, ...)` rows, the key selects the metric
    KeyValue,
}

/// Compiled descriptor set for one namespace
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct NamespaceMap {
    namespace: String,
    label_column_names: Vec<String>,
    metrics: HashMap<String, Arc<CompiledMetric>>,
    strategy: ConversionStrategy,
}

impl NamespaceMap {
    /// Create a compiled namespace map
    pub fn new(
        namespace: impl Into<String>,
        label_column_names: Vec<String>,
        metrics: HashMap<String, Arc<CompiledMetric>>,
        strategy: ConversionStrategy,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            label_column_names,
            metrics,
            strategy,
        }
    }

    /// Namespace name
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Label columns in descriptor order
    pub fn label_column_names(&self) -> &[String] {
        &self.label_column_names
    }

    /// Compiled metric for a column or key
    pub fn metric(&self, column: &str) -> Option<&Arc<CompiledMetric>> {
        self.metrics.get(column)
    }

    /// All compiled metrics, in no particular order
    pub fn metrics(&self) -> impl Iterator<Item = &Arc<CompiledMetric>> {
        self.metrics.values()
    }

    /// Converter strategy
    pub fn strategy(&self) -> ConversionStrategy {
        self.strategy
    }
}

/// One numeric sample ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Metric the sample belongs to
    pub metric: Arc<CompiledMetric>,
    /// Scaled value
    pub value: f64,
    /// Label values in descriptor order
    pub label_values: Vec<String>,
}
