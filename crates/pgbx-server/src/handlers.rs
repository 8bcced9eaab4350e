//! HTTP handlers

use prometheus::{Encoder, Registry, TextEncoder};
use rocket::State;
use rocket::get;
use rocket::http::{ContentType, Status};
use rocket::response::content::RawHtml;
use tracing::error;

use crate::routes::ExporterState;

/// Landing page
#[get("/")]
pub fn index(state: &State<ExporterState>) -> RawHtml<String> {
    RawHtml(format!(
        "<html>\n\
         <head><title>PgBouncer Exporter</title></head>\n\
         <body>\n\
         <h1>PgBouncer Exporter</h1>\n\
         <p><a href='{path}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        path = state.metrics_path
    ))
}

/// Metrics endpoint
///
/// Gathering polls PgBouncer over a blocking client, so it runs on the
/// blocking pool.
#[get("/")]
pub async fn metrics(state: &State<ExporterState>) -> Result<(ContentType, Vec<u8>), Status> {
    let registry = state.registry.clone();
    let encoded = tokio::task::spawn_blocking(move || encode(&registry))
        .await
        .map_err(|e| {
            error!(error = %e, "metrics gathering task failed");
            Status::InternalServerError
        })?;

    match encoded {
        Ok(body) => Ok(body),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            Err(Status::InternalServerError)
        }
    }
}

fn encode(registry: &Registry) -> prometheus::Result<(ContentType, Vec<u8>)> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    let content_type =
        ContentType::parse_flexible(encoder.format_type()).unwrap_or(ContentType::Plain);
    Ok((content_type, buffer))
}
