//! Metric map builder tests

use pgbx_application::domain_services::build_metric_maps;
use pgbx_domain::Error;
use pgbx_domain::schema::SchemaRegistry;
use pgbx_domain::value_objects::{ColumnSpec, ConversionStrategy, NamespaceSchema, ValueKind};

fn pgbouncer_maps() -> Vec<pgbx_domain::value_objects::NamespaceMap> {
    build_metric_maps("pgbouncer", &SchemaRegistry::pgbouncer()).expect("builtin schema compiles")
}

#[test]
fn test_namespaces_in_scrape_order() {
    let maps = pgbouncer_maps();
    let names: Vec<_> = maps.iter().map(|m| m.namespace()).collect();

    assert_eq!(names, ["databases", "lists", "pools", "stats", "config"]);
    assert_eq!(maps[4].strategy(), ConversionStrategy::KeyValue);
    assert!(maps[..4].iter().all(|m| m.strategy() == ConversionStrategy::Row));
}

#[test]
fn test_label_order_follows_declaration() {
    let maps = pgbouncer_maps();

    assert_eq!(
        maps[0].label_column_names(),
        ["name", "host", "port", "database", "force_user", "pool_mode"]
    );
    assert_eq!(maps[2].label_column_names(), ["database", "user", "pool_mode"]);
    assert!(maps[1].label_column_names().is_empty());
}

#[test]
fn test_labels_are_not_metrics() {
    let maps = pgbouncer_maps();
    let databases = &maps[0];

    assert!(databases.metric("name").is_none());
    assert!(databases.metric("pool_mode").is_none());
    assert!(databases.metric("pool_size").is_some());
}

#[test]
fn test_fq_names_use_prefix_and_exported_name() {
    let maps = build_metric_maps("pgb", &SchemaRegistry::pgbouncer()).unwrap();
    let stats = maps.iter().find(|m| m.namespace() == "stats").unwrap();
    let avg = stats.metric("avg_query_count").unwrap();
    let reserve = maps[0].metric("reserve_pool").unwrap();

    assert_eq!(avg.descriptor.fq_name, "pgb_stats_avg_queries_per_second");
    assert_eq!(reserve.descriptor.fq_name, "pgb_databases_reserve_pool_size");
    assert_eq!(&*avg.descriptor.label_names, ["database".to_string()]);
}

#[test]
fn test_value_kinds_and_scale() {
    let maps = pgbouncer_maps();
    let stats = maps.iter().find(|m| m.namespace() == "stats").unwrap();
    let config = maps.iter().find(|m| m.namespace() == "config").unwrap();

    let avg_query = stats.metric("avg_query").unwrap();
    assert_eq!(avg_query.value_kind, ValueKind::Gauge);
    assert!((avg_query.scale_factor - 1e-6).abs() < f64::EPSILON);

    let backlog = config.metric("listen_backlog").unwrap();
    assert_eq!(backlog.value_kind, ValueKind::Counter);
    assert!((backlog.scale_factor - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_fq_names_unique_across_namespaces() {
    let maps = pgbouncer_maps();
    let mut names: Vec<_> = maps
        .iter()
        .flat_map(|m| m.metrics().map(|c| c.descriptor.fq_name.clone()))
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();

    assert_eq!(names.len(), total);
}

static DUPLICATE_COLUMN: &[ColumnSpec] = &[
    ColumnSpec::gauge("cl_active", "a"),
    ColumnSpec::gauge("cl_active", "b"),
];
static DUPLICATE_NAMESPACES: &[NamespaceSchema] = &[NamespaceSchema {
    name: "pools",
    columns: DUPLICATE_COLUMN,
}];

#[test]
fn test_duplicate_column_rejected() {
    let registry = SchemaRegistry::new(DUPLICATE_NAMESPACES, &[]);
    let err = build_metric_maps("pgbouncer", &registry).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
}

static LABELLED_KEYS: &[ColumnSpec] = &[
    ColumnSpec::label("name"),
    ColumnSpec::gauge("max_client_conn", "m"),
];
static LABELLED_KEY_VALUE: &[NamespaceSchema] = &[NamespaceSchema {
    name: "config",
    columns: LABELLED_KEYS,
}];

#[test]
fn test_key_value_labels_rejected() {
    let registry = SchemaRegistry::new(&[], LABELLED_KEY_VALUE);
    let err = build_metric_maps("pgbouncer", &registry).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
}

static COLLIDING_A: &[ColumnSpec] = &[ColumnSpec::gauge("a", "a").exported_as("same")];
static COLLIDING_B: &[ColumnSpec] = &[ColumnSpec::gauge("b", "b").exported_as("same")];
static COLLIDING: &[NamespaceSchema] = &[
    NamespaceSchema {
        name: "x",
        columns: COLLIDING_A,
    },
    NamespaceSchema {
        name: "x",
        columns: COLLIDING_B,
    },
];

#[test]
fn test_colliding_fq_names_rejected() {
    let registry = SchemaRegistry::new(COLLIDING, &[]);
    let err = build_metric_maps("pgbouncer", &registry).unwrap_err();
    assert!(err.to_string().contains("pgbouncer_x_same"));
}
