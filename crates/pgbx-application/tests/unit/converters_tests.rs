//! Row and key-value converter tests

use pgbx_application::domain_services::{build_metric_maps, convert, convert_key_value, convert_row};
use pgbx_domain::Error;
use pgbx_domain::schema::SchemaRegistry;
use pgbx_domain::value_objects::{CellValue, ColumnSet, NamespaceMap, StatusTable, ValueKind};

fn namespace(name: &str) -> NamespaceMap {
    build_metric_maps("pgbouncer", &SchemaRegistry::pgbouncer())
        .unwrap()
        .into_iter()
        .find(|m| m.namespace() == name)
        .unwrap()
}

fn single_row(columns: &[&str], values: Vec<CellValue>) -> StatusTable {
    StatusTable::new(ColumnSet::new(columns.iter().copied()), vec![values])
}

#[test]
fn test_microsecond_column_scaled_to_seconds() {
    let stats = namespace("stats");
    let table = single_row(
        &["database", "avg_query"],
        vec!["db1".into(), CellValue::Integer(2_500_000)],
    );

    let out = convert_row(&stats, table.rows().next().unwrap());

    assert!(out.errors.is_empty());
    assert_eq!(out.observations.len(), 1);
    assert!((out.observations[0].value - 2.5).abs() < 1e-9);
    assert_eq!(out.observations[0].label_values, ["db1"]);
}

#[test]
fn test_labels_collected_in_declaration_order() {
    let databases = namespace("databases");
    let table = single_row(
        &["name", "pool_mode", "current_connections"],
        vec!["db1".into(), "session".into(), CellValue::Integer(3)],
    );

    let out = convert_row(&databases, table.rows().next().unwrap());

    assert_eq!(out.observations.len(), 1);
    let obs = &out.observations[0];
    assert_eq!(obs.metric.descriptor.fq_name, "pgbouncer_databases_current_connections");
    assert_eq!(obs.value, 3.0);
    // host, port, database and force_user are absent from the row
    assert_eq!(obs.label_values, ["db1", "", "", "", "", "session"]);
}

#[test]
fn test_integer_label_rendered_as_text() {
    let databases = namespace("databases");
    let table = single_row(
        &["name", "port", "pool_size"],
        vec!["db1".into(), CellValue::Integer(5432), CellValue::Integer(20)],
    );

    let out = convert_row(&databases, table.rows().next().unwrap());

    assert_eq!(out.observations[0].label_values[2], "5432");
}

#[test]
fn test_unknown_column_dropped_silently() {
    let lists = namespace("lists");
    let table = single_row(
        &["databases", "brand_new_column"],
        vec![CellValue::Integer(2), CellValue::Integer(9)],
    );

    let out = convert_row(&lists, table.rows().next().unwrap());

    assert!(out.errors.is_empty());
    assert_eq!(out.observations.len(), 1);
    assert_eq!(out.observations[0].metric.column, "databases");
}

#[test]
fn test_bad_value_skips_only_that_column() {
    let pools = namespace("pools");
    let table = single_row(
        &["database", "cl_active", "cl_waiting"],
        vec!["db1".into(), "lots".into(), CellValue::Integer(4)],
    );

    let out = convert_row(&pools, table.rows().next().unwrap());

    assert_eq!(out.observations.len(), 1);
    assert_eq!(out.observations[0].metric.column, "cl_waiting");
    assert_eq!(out.errors.len(), 1);
    assert!(matches!(
        &out.errors[0],
        Error::ValueCoercion { column, .. } if column == "cl_active"
    ));
}

#[test]
fn test_null_value_exported_as_nan() {
    let pools = namespace("pools");
    let table = single_row(&["database", "sv_idle"], vec!["db1".into(), CellValue::Null]);

    let out = convert_row(&pools, table.rows().next().unwrap());

    assert!(out.errors.is_empty());
    assert!(out.observations[0].value.is_nan());
}

#[test]
fn test_key_value_known_key() {
    let config = namespace("config");
    let table = single_row(
        &["key", "value", "default", "changeable"],
        vec!["max_client_conn".into(), "100".into(), "100".into(), "yes".into()],
    );

    let out = convert_key_value(&config, table.rows().next().unwrap()).unwrap();

    assert_eq!(out.observations.len(), 1);
    let obs = &out.observations[0];
    assert_eq!(obs.metric.descriptor.fq_name, "pgbouncer_config_max_client_conn");
    assert_eq!(obs.value, 100.0);
    assert!(obs.label_values.is_empty());
}

#[test]
fn test_key_value_counter_key() {
    let config = namespace("config");
    let table = single_row(&["key", "value"], vec!["listen_backlog".into(), "128".into()]);

    let out = convert_key_value(&config, table.rows().next().unwrap()).unwrap();

    assert_eq!(out.observations[0].metric.value_kind, ValueKind::Counter);
}

#[test]
fn test_key_value_unknown_key_ignored() {
    let config = namespace("config");
    let table = single_row(&["key", "value"], vec!["logfile".into(), "/var/log/x".into()]);

    let out = convert_key_value(&config, table.rows().next().unwrap()).unwrap();

    assert!(out.observations.is_empty());
    assert!(out.errors.is_empty());
}

#[test]
fn test_key_value_unparsable_value_is_non_fatal() {
    let config = namespace("config");
    let table = single_row(&["key", "value"], vec!["max_client_conn".into(), "many".into()]);

    let out = convert_key_value(&config, table.rows().next().unwrap()).unwrap();

    assert!(out.observations.is_empty());
    assert_eq!(out.errors.len(), 1);
}

#[test]
fn test_key_value_single_column_is_fatal() {
    let config = namespace("config");
    let table = single_row(&["key"], vec!["max_client_conn".into()]);

    let err = convert_key_value(&config, table.rows().next().unwrap()).unwrap_err();

    assert!(matches!(err, Error::RowShape { .. }));
}

#[test]
fn test_key_value_non_text_key_is_fatal() {
    let config = namespace("config");
    let table = single_row(&["key", "value"], vec![CellValue::Integer(1), "100".into()]);

    let err = convert_key_value(&config, table.rows().next().unwrap()).unwrap_err();

    assert!(err.to_string().contains("integer"));
}

#[test]
fn test_convert_dispatches_on_strategy() {
    let config = namespace("config");
    let lists = namespace("lists");
    let kv = single_row(&["key", "value"], vec!["max_client_conn".into(), "5".into()]);
    let row = single_row(&["users"], vec![CellValue::Integer(5)]);

    assert_eq!(convert(&config, kv.rows().next().unwrap()).unwrap().observations.len(), 1);
    assert_eq!(convert(&lists, row.rows().next().unwrap()).unwrap().observations.len(), 1);
    // row strategy never fails, even on rows a key-value converter would reject
    assert!(convert(&lists, kv.rows().next().unwrap()).is_ok());
}
