use std::future::Future;

use folio_models::email_address::EmailAddressWithName;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver the given email. The sender is part of the service
    /// configuration.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;

    /// Check whether the email backend is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Return whether the backend has everything it needs to deliver emails
    /// (e.g. credentials).
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipients: Vec<EmailAddressWithName>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub reply_to: Option<EmailAddressWithName>,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The provider refused the email and reported a reason.
    #[error("The email provider rejected the email: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(
                result
                    .then_some(())
                    .ok_or_else(|| anyhow::anyhow!("Failed to ping email backend")),
            ))
        });
        self
    }

    pub fn with_is_configured(mut self, result: bool) -> Self {
        self.expect_is_configured().return_const(result);
        self
    }
}
