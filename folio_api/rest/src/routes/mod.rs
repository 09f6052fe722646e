use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

pub async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}

fn ok() -> Response {
    Json(ApiResponse::ok()).into_response()
}

fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (code, Json(ApiResponse::error(error))).into_response()
}
