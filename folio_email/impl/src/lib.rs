use folio_email_contracts::{Email, EmailSendError, EmailService};

pub use crate::{
    resend::{ResendEmailServiceConfig, ResendEmailServiceImpl},
    smtp::SmtpEmailServiceImpl,
};

mod resend;
mod smtp;

/// The email backend selected by the configuration.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Resend(ResendEmailServiceImpl),
    Smtp(SmtpEmailServiceImpl),
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        match self {
            Self::Resend(resend) => resend.send(email).await,
            Self::Smtp(smtp) => smtp.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Resend(resend) => resend.ping().await,
            Self::Smtp(smtp) => smtp.ping().await,
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            Self::Resend(resend) => resend.is_configured(),
            Self::Smtp(smtp) => smtp.is_configured(),
        }
    }
}

impl From<ResendEmailServiceImpl> for EmailServiceImpl {
    fn from(value: ResendEmailServiceImpl) -> Self {
        Self::Resend(value)
    }
}

impl From<SmtpEmailServiceImpl> for EmailServiceImpl {
    fn from(value: SmtpEmailServiceImpl) -> Self {
        Self::Smtp(value)
    }
}
