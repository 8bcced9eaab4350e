//! `pgbouncer_exporter` binary
//!
//! Flags override the configuration file and the environment.

use clap::Parser;
use pgbx_infrastructure::config::ConfigLoader;
use pgbx_server::run;

/// Prometheus exporter for PgBouncer
#[derive(Parser, Debug)]
#[command(name = "pgbouncer_exporter")]
#[command(about = "Prometheus exporter for PgBouncer admin console statistics")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Address on which to expose metrics and web interface
    #[arg(long = "web.listen-address")]
    pub listen_address: Option<String>,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path")]
    pub telemetry_path: Option<String>,

    /// Connection string for accessing PgBouncer
    #[arg(long = "pgBouncer.connectionString")]
    pub connection_string: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log.level")]
    pub log_level: Option<String>,
}

impl Cli {
    fn into_loader(self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if let Some(path) = self.config {
            loader = loader.with_config_path(path);
        }
        let overrides = [
            ("server.listen_address", self.listen_address),
            ("server.metrics_path", self.telemetry_path),
            ("pgbouncer.connection_string", self.connection_string),
            ("logging.level", self.log_level),
        ];
        overrides
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .fold(loader, |loader, (key, value)| loader.with_override(key, value))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse().into_loader()).await
}
