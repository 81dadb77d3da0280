//! HTML aggregation across attached probes

use actix_web::HttpRequest;

use super::list::ProberList;

impl ProberList {
    /// Append each probe's HTML snippet to `writer`.
    ///
    /// Probes exposing the plain render capability are invoked in the order
    /// in which they were attached; probes without it are skipped.
    pub fn write_html(&self, writer: &mut String) {
        for entry in self.snapshot() {
            if let Some(html_writer) = entry.prober.as_html_writer() {
                html_writer.write_html(writer);
            }
        }
    }

    /// Request-aware variant of [`write_html`](Self::write_html).
    ///
    /// Probes exposing the request-aware render capability are invoked in
    /// attachment order with `req` passed through unmodified, so a probe can
    /// vary its output by query parameter. Independent of `write_html`; a
    /// probe may expose either capability, both, or neither.
    pub fn request_write_html(&self, writer: &mut String, req: &HttpRequest) {
        for entry in self.snapshot() {
            if let Some(html_writer) = entry.prober.as_request_html_writer() {
                html_writer.request_write_html(writer, req);
            }
        }
    }
}
