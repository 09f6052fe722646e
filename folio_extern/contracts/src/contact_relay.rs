use std::future::Future;

use thiserror::Error;

/// Client of the mail relay endpoint (`POST /api/contact`).
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRelayApiService: Send + Sync + 'static {
    fn submit(
        &self,
        request: ContactRelayRequest,
    ) -> impl Future<Output = Result<(), ContactRelayError>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRelayRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub hp: String,
}

#[derive(Debug, Error)]
pub enum ContactRelayError {
    /// The relay answered with `ok: false` and an error message.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactRelayApiService {
    pub fn with_submit(
        mut self,
        request: ContactRelayRequest,
        result: Result<(), ContactRelayError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
