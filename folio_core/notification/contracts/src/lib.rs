use folio_models::notification::{NotificationId, NotificationItem, NotificationOptions};

/// Queue of transient notifications that dismiss themselves after their
/// duration has elapsed.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Show a new notification and schedule its removal.
    fn notify(&self, message: String, options: NotificationOptions) -> NotificationId;

    /// Remove a notification immediately. Unknown ids are ignored.
    fn dismiss(&self, id: NotificationId);

    /// Remove all notifications.
    fn clear(&self);

    /// Return the active notifications in the order they were created.
    fn list(&self) -> Vec<NotificationItem>;

    /// Return the remaining lifetime of a notification as a fraction between
    /// `0` and `1`.
    fn progress(&self, id: NotificationId) -> Option<f64>;
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify(
        mut self,
        message: impl Into<String>,
        options: NotificationOptions,
        id: NotificationId,
    ) -> Self {
        self.expect_notify()
            .once()
            .with(
                mockall::predicate::eq(message.into()),
                mockall::predicate::eq(options),
            )
            .return_const(id);
        self
    }
}
