//! HTTP exposure of the agent's status and metrics
//!
//! The registry itself owns no network protocol; this module wires its
//! render operations and the metrics sink into an HTTP surface.

pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use state::AppState;

use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::utils::error::Result;

/// Serve the agent HTTP API until shutdown.
pub async fn serve(state: AppState) -> Result<()> {
    let host = state.config.server().host.clone();
    let port = state.config.server().port;
    info!("HTTP server listening on http://{}:{}", host, port);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(TracingLogger::default())
            .configure(routes::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
