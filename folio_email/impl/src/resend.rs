use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::email_address::EmailAddressWithName;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Delivers emails via the resend http api.
#[derive(Debug, Clone)]
pub struct ResendEmailServiceImpl {
    config: Arc<ResendEmailServiceConfig>,
    client: reqwest::Client,
}

#[derive(Clone)]
pub struct ResendEmailServiceConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub from: EmailAddressWithName,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResendEmailServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendEmailServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResendEmailServiceImpl {
    pub fn new(config: ResendEmailServiceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&*folio_utils::USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            config: config.into(),
            client,
        })
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("No resend api key has been configured"))
    }
}

impl EmailService for ResendEmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let api_key = self.api_key()?;

        let request = SendEmailRequest {
            from: self.config.from.to_string(),
            to: email.recipients.iter().map(|x| x.email()).collect(),
            subject: &email.subject,
            html: email.html.as_deref(),
            text: &email.text,
            reply_to: email.reply_to.as_ref().map(|x| x.email()),
        };

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to resend")?;

        let status = response.status();
        if status.is_success() {
            let SendEmailResponse { id } = response
                .json()
                .await
                .context("Failed to parse resend response")?;
            debug!(%id, "Email accepted by resend");
            return Ok(());
        }

        match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse {
                message: Some(message),
            }) => {
                debug!(%status, reason = %message, "Email rejected by resend");
                Err(EmailSendError::Rejected(message))
            }
            _ => Err(anyhow!("Resend responded with status {status}").into()),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.api_key()?;

        // Any http response proves that the api is reachable.
        self.client
            .head(self.config.endpoint.clone())
            .send()
            .await
            .map(|_| ())
            .context("Failed to reach resend")
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}
