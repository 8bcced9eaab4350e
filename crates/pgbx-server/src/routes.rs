//! Rocket assembly

use pgbx_domain::error::{Error, Result};
use prometheus::Registry;
use rocket::http::ext::IntoOwned;
use rocket::http::uri::Origin;
use rocket::{Build, Rocket, routes};

use crate::handlers;

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct ExporterState {
    /// Registry holding the PgBouncer collector
    pub registry: Registry,
    /// Path the metrics route is mounted at
    pub metrics_path: String,
}

/// Build the Rocket instance
///
/// Fails if the metrics path is not a usable mount point.
pub fn exporter_rocket(state: ExporterState) -> Result<Rocket<Build>> {
    let mount = Origin::parse(&state.metrics_path)
        .map_err(|e| {
            Error::configuration(format!("Invalid metrics path {}: {e}", state.metrics_path))
        })?
        .into_owned();
    if mount.query().is_some() || mount.path().as_str() == "/" {
        return Err(Error::configuration(format!(
            "Invalid metrics path {}",
            state.metrics_path
        )));
    }

    Ok(rocket::build()
        .mount("/", routes![handlers::index])
        .mount(mount, routes![handlers::metrics])
        .manage(state))
}
