use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_form_contracts::{
    ContactForm, ContactFormField, ContactFormOutcome, ContactFormService, ContactFormView,
};
use folio_core_notification_contracts::NotificationService;
use folio_extern_impl::contact_relay::ContactRelayApiServiceConfig;
use tracing::debug;
use url::Url;

use crate::environment::ConfigProvider;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form
    #[command(aliases(["s"]))]
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        message: String,
        /// Contact relay endpoint, overrides `contact_form.endpoint`
        #[arg(long)]
        endpoint: Option<Url>,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                subject,
                message,
                endpoint,
            } => {
                let form = ContactForm {
                    name,
                    email,
                    subject,
                    message,
                    hp: String::new(),
                };
                send(config, form, endpoint).await
            }
        }
    }
}

async fn send(config: Config, form: ContactForm, endpoint: Option<Url>) -> anyhow::Result<()> {
    let mut config_provider = ConfigProvider::new(&config)?;
    if let Some(endpoint) = endpoint {
        config_provider.contact_relay_api_service_config = Some(
            ContactRelayApiServiceConfig::new(endpoint, config.contact_form.timeout.into()),
        );
    }

    let notification = config_provider.notification();
    let contact_form = config_provider.contact_form(notification.clone(), TerminalFormView)?;

    let outcome = contact_form.submit(form).await;

    for item in notification.list() {
        println!("[{}] {}", item.variant, item.message);
    }

    match outcome {
        ContactFormOutcome::Sent => Ok(()),
        outcome => bail!("Message was not sent: {outcome:?}"),
    }
}

/// Points the user at invalid fields on the terminal.
#[derive(Debug, Clone, Copy)]
struct TerminalFormView;

impl ContactFormView for TerminalFormView {
    fn scroll_into_view(&self, field: ContactFormField) {
        debug!(%field, "Highlighting field");
    }

    fn focus(&self, field: ContactFormField) {
        eprintln!("Please check the {field} field.");
    }
}
