//! Status page, health and metrics endpoints

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use std::fmt::Write as _;
use tracing::debug;

use crate::metrics::LatencySnapshot;
use crate::prober::ProbeStatus;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;

/// Configure status routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status_page))
        .route("/health", web::get().to(health_check))
        .route("/metrics", web::get().to(metrics));
}

/// Human-readable status page
///
/// Aggregates every probe's HTML snippet: probes exposing the plain render
/// capability first, then probes whose rendering depends on the inbound
/// request.
async fn status_page(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    debug!("status page requested");

    let mut body = String::new();
    let _ = writeln!(body, "<!DOCTYPE html>");
    let _ = writeln!(body, "<html><head><title>vigil agent</title></head><body>");
    let _ = writeln!(body, "<h1>vigil agent</h1>");
    let _ = writeln!(
        body,
        "<p>version {} | uptime {}s | {} probes | scheduling {}</p>",
        env!("CARGO_PKG_VERSION"),
        state.uptime_seconds(),
        state.probers.len(),
        if state.probers.is_probing() {
            "running"
        } else {
            "stopped"
        },
    );

    state.probers.write_html(&mut body);
    state.probers.request_write_html(&mut body, &req);

    let _ = writeln!(body, "</body></html>");

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Health check endpoint
///
/// Returns a JSON summary of the probing subsystem. This endpoint is
/// typically used by load balancers and monitoring systems.
async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("ok"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: state.uptime_seconds(),
        scheduling_active: state.probers.is_probing(),
        probe_latency: state.probers.latency().snapshot(),
        probes: state.probers.statuses(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Metrics endpoint
///
/// Returns every registered instrument in plain text, one reading per line.
async fn metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("metrics requested");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(state.metrics.render_text()))
}

/// Probing subsystem health summary
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    scheduling_active: bool,
    probe_latency: LatencySnapshot,
    probes: Vec<ProbeStatus>,
}
