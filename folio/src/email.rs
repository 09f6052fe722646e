use anyhow::Context;
use folio_config::{EmailConfig, EmailProvider};
use folio_email_impl::{
    EmailServiceImpl, ResendEmailServiceConfig, ResendEmailServiceImpl, SmtpEmailServiceImpl,
};
use folio_models::email_address::EmailAddressWithName;

/// Set up the configured email provider. Relayed messages are sent as `from`.
pub fn connect(config: &EmailConfig, from: EmailAddressWithName) -> anyhow::Result<EmailServiceImpl> {
    match config.provider {
        EmailProvider::Resend => ResendEmailServiceImpl::new(ResendEmailServiceConfig {
            endpoint: config.resend.endpoint.clone(),
            api_key: config.resend.api_key.clone(),
            from,
            timeout: config.timeout.into(),
        })
        .map(Into::into),
        EmailProvider::Smtp => {
            let smtp = config
                .smtp
                .as_ref()
                .context("The smtp email provider requires an [email.smtp] section")?;
            SmtpEmailServiceImpl::new(&smtp.url, from, config.timeout.into()).map(Into::into)
        }
    }
    .context("Failed to set up email delivery")
}
