use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::contact::{ContactIssues, ContactSubmission};
use tracing::debug;

use super::{error, internal_server_error, ok};
use crate::models::{contact::parse_body, ApiResponse};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            CONTACT_ROUTE,
            routing::post(send_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(%rejection, "Failed to read contact request body");
            return error(rejection.status(), rejection.body_text());
        }
    };

    let submission = match parse_body(&body).and_then(ContactSubmission::parse) {
        Ok(submission) => submission,
        Err(issues) => return invalid_payload(issues),
    };

    match service.send_message(submission).await {
        Ok(_) => ok(),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
        Err(err) => error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

async fn preflight() -> Response {
    ok()
}

async fn method_not_allowed() -> Response {
    let response = error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    ([(header::ALLOW, "POST")], response).into_response()
}

fn invalid_payload(issues: ContactIssues) -> Response {
    debug!(?issues, "Rejecting invalid contact payload");
    let response = ApiResponse::error("Invalid payload").with_issues(issues);
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}
