use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::email_address::EmailAddressWithName;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variables understood in addition to the `FOLIO_*` variables,
/// mapped to their configuration keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("RESEND_API_KEY", "email.resend.api_key"),
    ("CONTACT_TO", "contact.recipients"),
    ("CONTACT_FROM", "contact.from"),
    ("CONTACT_ALLOWED_ORIGIN", "contact.allowed_origin"),
];

/// Loads the config from the given files. Later files override earlier ones,
/// and environment variables override all files.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Like [`load`], but applies the given toml snippets after the environment.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    build(paths, overrides, |var| std::env::var(var).ok())
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__"),
        );

    // Empty variables count as unset and keep the configured value.
    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, env(var).filter(|value| !value.is_empty()))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub contact_form: ContactFormConfig,
    pub notification: NotificationConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    /// Timeout of a single request to the email provider.
    pub timeout: Duration,
    pub resend: ResendConfig,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Resend,
    Smtp,
}

#[derive(Deserialize)]
pub struct ResendConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Sender identity of the relayed messages.
    pub from: EmailAddressWithName,
    /// Comma separated list of recipients.
    #[serde(default)]
    pub recipients: String,
    pub allowed_origin: String,
    /// Upper bound for the delivery of a single message.
    pub send_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactFormConfig {
    /// Relay endpoint the contact form posts to. Without an endpoint the form
    /// only simulates a successful submission.
    pub endpoint: Option<Url>,
    pub timeout: Duration,
    pub focus_delay: Duration,
}

#[derive(Debug, Deserialize)]
pub struct NotificationConfig {
    pub default_duration: Duration,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
