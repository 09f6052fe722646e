use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Setting up email delivery via {:?}", config.email.provider);
    let email = email::connect(&config.email, config.contact.from.clone())?;
    if !email.is_configured() {
        warn!("Email delivery is not configured, contact messages will be rejected");
    } else if let Err(err) = email.ping().await {
        warn!("Email provider is not reachable: {err:#}");
    }

    let config_provider = ConfigProvider::new(&config)?;
    if config_provider.contact_service_config.recipients.is_empty() {
        warn!("No contact recipients configured, contact messages will be rejected");
    }

    let server = Provider::new(config_provider, email).rest_server()?;
    info!("Starting http server on {}", config.http.address);
    server.serve(config.http.address).await
}
