//! Server Initialization
//!
//! Loads configuration, installs logging, compiles the metric maps and
//! launches Rocket. A schema that fails to compile stops startup; an
//! unreachable PgBouncer does not.

use std::net::SocketAddr;
use std::sync::Arc;

use pgbx_application::domain_services::build_metric_maps;
use pgbx_application::use_cases::ScrapeService;
use pgbx_domain::schema::SchemaRegistry;
use pgbx_infrastructure::adapters::PgBouncerSource;
use pgbx_infrastructure::config::{AppConfig, ConfigLoader};
use pgbx_infrastructure::exporter::{PgBouncerCollector, build_registry};
use pgbx_infrastructure::logging::init_logging;
use prometheus::Registry;
use rocket::config::{Config as RocketConfig, LogLevel};
use tracing::info;

use crate::routes::{ExporterState, exporter_rocket};

/// Run the exporter until Rocket shuts down
pub async fn run(loader: ConfigLoader) -> Result<(), Box<dyn std::error::Error>> {
    let config = loader.load()?;
    init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_address = %config.server.listen_address,
        metrics_path = %config.server.metrics_path,
        "Starting pgbouncer_exporter"
    );

    let registry = create_registry(&config)?;
    let rocket_config = rocket_config(&config)?;
    let state = ExporterState {
        registry,
        metrics_path: config.server.metrics_path.clone(),
    };

    exporter_rocket(state)?
        .configure(rocket_config)
        .launch()
        .await
        .map_err(|e| format!("Rocket launch failed: {e}"))?;

    info!("pgbouncer_exporter stopped");
    Ok(())
}

/// Wire source, scrape service and collector into a registry
pub fn create_registry(config: &AppConfig) -> pgbx_domain::Result<Registry> {
    let prefix = &config.pgbouncer.metric_prefix;
    let maps = build_metric_maps(prefix, &SchemaRegistry::pgbouncer())?;
    let source = Arc::new(PgBouncerSource::new(&config.pgbouncer)?);
    let service = Arc::new(ScrapeService::new(source, maps));
    build_registry(PgBouncerCollector::new(prefix, service)?)
}

fn rocket_config(config: &AppConfig) -> pgbx_domain::Result<RocketConfig> {
    let address: SocketAddr = config.server.listen_address.parse().map_err(|e| {
        pgbx_domain::Error::configuration(format!(
            "Invalid listen address {}: {e}",
            config.server.listen_address
        ))
    })?;

    Ok(RocketConfig {
        address: address.ip(),
        port: address.port(),
        // requests are logged through tracing
        log_level: LogLevel::Critical,
        ..RocketConfig::default()
    })
}
