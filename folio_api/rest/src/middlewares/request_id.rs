//! Tag every request with an id that is echoed in the `X-Request-Id` header.
//!
//! Ids supplied by the client are kept, all other requests get a base64
//! encoded UUIDv7.

use axum::{
    http::{HeaderName, HeaderValue, Request},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::URL_SAFE_NO_PAD};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeUuidV7))
}

/// The id of the current request as a string, if one has been assigned.
pub fn get<B>(request: &Request<B>) -> Option<&str> {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
}

#[derive(Debug, Clone, Copy)]
struct MakeUuidV7;

impl MakeRequestId for MakeUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Base64Display::new(Uuid::now_v7().as_bytes(), &URL_SAFE_NO_PAD).to_string();
        HeaderValue::try_from(id).ok().map(RequestId::new)
    }
}
