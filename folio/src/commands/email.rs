use anyhow::{ensure, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{Email, EmailService};
use folio_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email, config.contact.from)?;
    ensure!(
        email_service.is_configured(),
        "Email delivery is not configured"
    );

    email_service
        .send(Email {
            recipients: vec![recipient],
            subject: "Email Deliverability Test".into(),
            text: "Email deliverability seems to be working!".into(),
            html: None,
            reply_to: None,
        })
        .await
        .context("Failed to send email")
}
