use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Relay a validated submission to the configured recipients.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactDelivery, ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDelivery {
    /// The message has been handed over to the email provider.
    Sent,
    /// The submission has been identified as spam and silently dropped.
    Discarded,
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Server not configured")]
    NotConfigured,
    #[error("{}", .reason.as_deref().unwrap_or("Send failed"))]
    Send { reason: Option<String> },
    #[error("Send timed out")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactDelivery, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
