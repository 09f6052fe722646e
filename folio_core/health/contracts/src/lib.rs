use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthService: Send + Sync + 'static {
    fn get_status(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub email: bool,
}

#[cfg(feature = "mock")]
impl MockHealthService {
    pub fn with_get_status(mut self, result: HealthStatus) -> Self {
        self.expect_get_status()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
