use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use folio_extern_contracts::contact_relay::{
    ContactRelayApiService, ContactRelayError, ContactRelayRequest,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactRelayApiServiceImpl {
    config: ContactRelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactRelayApiServiceConfig {
    endpoint: Arc<Url>,
    timeout: Duration,
}

impl ContactRelayApiServiceConfig {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl ContactRelayApiServiceImpl {
    pub fn new(config: ContactRelayApiServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl ContactRelayApiService for ContactRelayApiServiceImpl {
    async fn submit(&self, request: ContactRelayRequest) -> Result<(), ContactRelayError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SubmitRequest::from(&request))
            .send()
            .await
            .context("Failed to reach the contact relay")?;

        let status = response.status();
        let body = response
            .json::<SubmitResponse>()
            .await
            .with_context(|| format!("Invalid response from the contact relay ({status})"))?;
        debug!(%status, ok = body.ok, "Contact relay responded");

        match body {
            SubmitResponse { ok: true, .. } => Ok(()),
            SubmitResponse {
                error: Some(error), ..
            } => Err(ContactRelayError::Rejected(error)),
            SubmitResponse { error: None, .. } => {
                Err(anyhow!("Contact relay failed without error message ({status})").into())
            }
        }
    }
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    message: &'a str,
    hp: &'a str,
}

impl<'a> From<&'a ContactRelayRequest> for SubmitRequest<'a> {
    fn from(value: &'a ContactRelayRequest) -> Self {
        Self {
            name: &value.name,
            email: &value.email,
            subject: value.subject.as_deref(),
            message: &value.message,
            hp: &value.hp,
        }
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    ok: bool,
    error: Option<String>,
}
