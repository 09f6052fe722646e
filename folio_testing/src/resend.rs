use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Start a standalone fake resend server and log every received email.
pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend endpoint: http://{host}:{port}{EMAILS_ROUTE}");
    info!("API key: {api_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, FakeResend::new(api_key).router())
        .await
        .context("Failed to start HTTP server")
}

/// In-memory fake of the resend email api.
///
/// Requests must carry the configured api key as bearer token. Accepted emails
/// are recorded and can be inspected with [`FakeResend::received`].
#[derive(Debug, Clone)]
pub struct FakeResend {
    state: Arc<FakeResendState>,
}

#[derive(Debug)]
struct FakeResendState {
    api_key: String,
    received: Mutex<Vec<ReceivedEmail>>,
    failure: Mutex<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

impl FakeResend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            state: FakeResendState {
                api_key: api_key.into(),
                received: Default::default(),
                failure: Default::default(),
            }
            .into(),
        }
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(EMAILS_ROUTE, routing::post(send_email))
            .with_state(Arc::clone(&self.state))
    }

    /// Serve the fake on a random local port and return the url of the
    /// emails endpoint.
    pub async fn spawn(&self) -> anyhow::Result<Url> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind fake resend server")?;
        let addr = listener.local_addr()?;

        let router = self.router();
        tokio::spawn(async move { axum::serve(listener, router).await });

        format!("http://{addr}{EMAILS_ROUTE}")
            .parse()
            .map_err(Into::into)
    }

    /// Reject all following emails with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.state.failure) = Some(message.into());
    }

    /// All emails accepted so far, in the order they were received.
    pub fn received(&self) -> Vec<ReceivedEmail> {
        lock(&self.state.received).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    message: String,
    name: &'static str,
}

fn error(status: StatusCode, message: String, name: &'static str) -> Response {
    let body = ErrorResponse {
        status_code: status.as_u16(),
        message,
        name,
    };
    (status, Json(body)).into_response()
}

async fn send_email(
    state: State<Arc<FakeResendState>>,
    headers: HeaderMap,
    Json(email): Json<ReceivedEmail>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|key| key == state.api_key);
    if !authorized {
        return error(
            StatusCode::UNAUTHORIZED,
            "API key is invalid".into(),
            "validation_error",
        );
    }

    if let Some(message) = lock(&state.failure).clone() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, message, "validation_error");
    }

    info!(subject = %email.subject, to = ?email.to, "Received email");
    lock(&state.received).push(email);

    Json(SendEmailResponse { id: Uuid::new_v4() }).into_response()
}
