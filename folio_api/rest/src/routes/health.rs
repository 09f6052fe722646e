use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_health_contracts::MockHealthService;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::routes::tests::send;

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let service = MockHealthService::new().with_get_status(HealthStatus { email: true });
        let request = Request::get("/health").body(Body::empty()).unwrap();

        // Act
        let response = send(router(Arc::new(service)), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let service = MockHealthService::new().with_get_status(HealthStatus { email: false });
        let request = Request::get("/health").body(Body::empty()).unwrap();

        // Act
        let response = send(router(Arc::new(service)), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, json!({"http": true, "email": false}));
    }
}
