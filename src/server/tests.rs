//! HTTP handler tests

#![cfg(test)]

use actix_web::{App, HttpRequest, test, web};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::metrics::MetricsRegistry;
use crate::prober::{HtmlWriter, Prober, ProberList, RequestHtmlWriter};
use crate::utils::error::Result;

use super::routes;
use super::state::AppState;

/// Probe rendering a fixed fragment plus the query string it was handed
struct BannerProber;

#[async_trait]
impl Prober for BannerProber {
    async fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn as_html_writer(&self) -> Option<&dyn HtmlWriter> {
        Some(self)
    }

    fn as_request_html_writer(&self) -> Option<&dyn RequestHtmlWriter> {
        Some(self)
    }
}

impl HtmlWriter for BannerProber {
    fn write_html(&self, writer: &mut String) {
        writer.push_str("<p>banner-ok</p>");
    }
}

impl RequestHtmlWriter for BannerProber {
    fn request_write_html(&self, writer: &mut String, req: &HttpRequest) {
        writer.push_str(&format!("<p>query:{}</p>", req.query_string()));
    }
}

fn test_state() -> AppState {
    let metrics = MetricsRegistry::new();
    let probers = ProberList::new(Arc::clone(&metrics), "sys/probers").unwrap();
    let banner: Arc<dyn Prober> = Arc::new(BannerProber);
    probers.add(Some(banner), "probers/banner", 0).unwrap();
    AppState::new(Arc::new(Config::default()), probers, metrics)
}

#[actix_web::test]
async fn test_status_page_aggregates_probe_fragments() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/?mode=verbose").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<h1>vigil agent</h1>"));
    assert!(body.contains("banner-ok"));
    assert!(body.contains("query:mode=verbose"));
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["scheduling_active"], false);
    assert_eq!(body["data"]["probes"][0]["name"], "probers/banner");
}

#[actix_web::test]
async fn test_metrics_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("sys/probers/probe-duration/count 0"));
    assert!(body.contains("probers/banner/probe-duration/count 0"));
}
