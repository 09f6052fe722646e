use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn, Span};

use super::request_id;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(())
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    tracing::debug_span!(
        "http-request",
        method = %request.method(),
        route = request.uri().path(),
        request_id = request_id::get(request).unwrap_or_default(),
    )
}

fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    if status.is_server_error() {
        warn!(?latency, %status, "Request failed");
    } else {
        debug!(?latency, %status, "Request handled");
    }
}
