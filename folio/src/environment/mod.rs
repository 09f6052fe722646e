use anyhow::Context;
use axum::http::HeaderValue;
use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_form_contracts::ContactFormView;
use folio_core_contact_form_impl::{ContactFormServiceConfig, ContactFormServiceImpl};
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use folio_core_notification_impl::{NotificationServiceConfig, NotificationServiceImpl};
use folio_extern_impl::contact_relay::{ContactRelayApiServiceConfig, ContactRelayApiServiceImpl};
use folio_models::email_address::EmailAddressWithName;
use folio_templates_impl::TemplateServiceImpl;
use types::{ContactForm, Email, Notification, RestServer};

pub mod types;

/// Service configurations derived from the application config.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    pub rest_server_config: RestServerConfig,

    // Extern
    pub contact_relay_api_service_config: Option<ContactRelayApiServiceConfig>,

    // Core
    pub contact_service_config: ContactServiceConfig,
    pub contact_form_service_config: ContactFormServiceConfig,
    pub health_service_config: HealthServiceConfig,
    pub notification_service_config: NotificationServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            allowed_origin: HeaderValue::from_str(&config.contact.allowed_origin)
                .with_context(|| {
                    format!(
                        "Invalid allowed origin {:?}",
                        config.contact.allowed_origin
                    )
                })?,
        };

        // Extern
        let contact_relay_api_service_config =
            config.contact_form.endpoint.as_ref().map(|endpoint| {
                ContactRelayApiServiceConfig::new(
                    endpoint.clone(),
                    config.contact_form.timeout.into(),
                )
            });

        // Core
        let recipients = EmailAddressWithName::parse_list(&config.contact.recipients)
            .context("Invalid contact recipients")?;
        let contact_service_config = ContactServiceConfig {
            recipients: recipients.into(),
            send_timeout: config.contact.send_timeout.into(),
        };

        let contact_form_service_config = ContactFormServiceConfig {
            focus_delay: config.contact_form.focus_delay.into(),
        };

        let health_service_config = HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        let notification_service_config = NotificationServiceConfig {
            default_duration: config.notification.default_duration.into(),
        };

        Ok(Self {
            rest_server_config,
            contact_relay_api_service_config,
            contact_service_config,
            contact_form_service_config,
            health_service_config,
            notification_service_config,
        })
    }

    pub fn notification(&self) -> Notification {
        NotificationServiceImpl::new(self.notification_service_config.clone())
    }

    /// Build the contact form controller. Without a configured relay endpoint
    /// the form acknowledges valid submissions without sending them.
    pub fn contact_form<View: ContactFormView>(
        &self,
        notification: Notification,
        view: View,
    ) -> anyhow::Result<ContactForm<View>> {
        let relay = self
            .contact_relay_api_service_config
            .clone()
            .map(ContactRelayApiServiceImpl::new)
            .transpose()?;

        Ok(ContactFormServiceImpl::new(
            notification,
            view,
            relay,
            self.contact_form_service_config.clone(),
        ))
    }
}

/// Provides the services that depend on the email backend.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        let contact = ContactServiceImpl {
            email: self.email.clone(),
            template: TemplateServiceImpl::new()?,
            config: self.config.contact_service_config.clone(),
        };
        let health =
            HealthServiceImpl::new(self.email.clone(), self.config.health_service_config.clone());

        Ok(RestServer::new(
            health,
            contact,
            self.config.rest_server_config.clone(),
        ))
    }
}
