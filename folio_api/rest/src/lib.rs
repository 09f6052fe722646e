use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use folio_core_contact_contracts::ContactService;
use folio_core_health_contracts::HealthService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

pub use routes::contact::CONTACT_ROUTE;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Value of the `Access-Control-Allow-Origin` header.
    pub allowed_origin: HeaderValue,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthService,
    Contact: ContactService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self, address: SocketAddr) -> anyhow::Result<()> {
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind to {address}"))?;
        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(Arc::new(self.contact)))
            .fallback(routes::not_found);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::headers::add(self.config.allowed_origin)(router)
    }
}
