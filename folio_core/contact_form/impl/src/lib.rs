use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use folio_core_contact_form_contracts::{
    ContactForm, ContactFormField, ContactFormOutcome, ContactFormService, ContactFormView,
};
use folio_core_notification_contracts::NotificationService;
use folio_extern_contracts::contact_relay::{
    ContactRelayApiService, ContactRelayError, ContactRelayRequest,
};
use folio_models::{
    contact::is_plausible_email,
    notification::{NotificationOptions, NotificationVariant},
};
use tracing::{debug, warn};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Could not send your message. Please try again later.";
pub const BUSY_MESSAGE: &str = "Your previous message is still being sent.";

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<Notification, View, Relay> {
    notification: Notification,
    view: View,
    /// Without a relay, valid submissions are acknowledged without being sent
    /// anywhere.
    relay: Option<Relay>,
    config: ContactFormServiceConfig,
    pending: Arc<AtomicBool>,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    /// Delay between scrolling an invalid field into view and focusing it.
    pub focus_delay: Duration,
}

impl<Notification, View, Relay> ContactFormServiceImpl<Notification, View, Relay> {
    pub fn new(
        notification: Notification,
        view: View,
        relay: Option<Relay>,
        config: ContactFormServiceConfig,
    ) -> Self {
        Self {
            notification,
            view,
            relay,
            config,
            pending: Default::default(),
        }
    }
}

impl<Notification, View, Relay> ContactFormService
    for ContactFormServiceImpl<Notification, View, Relay>
where
    Notification: NotificationService,
    View: ContactFormView,
    Relay: ContactRelayApiService,
{
    async fn submit(&self, form: ContactForm) -> ContactFormOutcome {
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            self.notify(BUSY_MESSAGE, NotificationVariant::Warning);
            return ContactFormOutcome::Busy;
        };

        let name = form.name.trim();
        let email = form.email.trim();
        let message = form.message.trim();

        if !is_plausible_email(email) {
            self.notify(INVALID_EMAIL_MESSAGE, NotificationVariant::Error);
            self.highlight(ContactFormField::Email).await;
            return ContactFormOutcome::InvalidEmail;
        }

        let missing = if name.is_empty() {
            Some(ContactFormField::Name)
        } else if message.is_empty() {
            Some(ContactFormField::Message)
        } else {
            None
        };
        if let Some(field) = missing {
            self.notify(MISSING_FIELDS_MESSAGE, NotificationVariant::Error);
            self.highlight(field).await;
            return ContactFormOutcome::MissingField(field);
        }

        let Some(relay) = &self.relay else {
            debug!("No contact relay configured, skipping submission");
            self.notify(SENT_MESSAGE, NotificationVariant::Success);
            return ContactFormOutcome::Sent;
        };

        let request = ContactRelayRequest {
            name: name.into(),
            email: email.into(),
            subject: form
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|subject| !subject.is_empty())
                .map(Into::into),
            message: message.into(),
            hp: form.hp,
        };

        match relay.submit(request).await {
            Ok(()) => {
                self.notify(SENT_MESSAGE, NotificationVariant::Success);
                ContactFormOutcome::Sent
            }
            Err(ContactRelayError::Rejected(error)) => {
                self.notify(&error, NotificationVariant::Error);
                ContactFormOutcome::Failed(error)
            }
            Err(ContactRelayError::Other(err)) => {
                warn!("Failed to submit contact form: {err:#}");
                self.notify(FAILED_MESSAGE, NotificationVariant::Error);
                ContactFormOutcome::Failed(FAILED_MESSAGE.into())
            }
        }
    }
}

impl<Notification, View, Relay> ContactFormServiceImpl<Notification, View, Relay>
where
    Notification: NotificationService,
    View: ContactFormView,
{
    fn notify(&self, message: &str, variant: NotificationVariant) {
        self.notification
            .notify(message.into(), NotificationOptions::variant(variant));
    }

    async fn highlight(&self, field: ContactFormField) {
        self.view.scroll_into_view(field);
        tokio::time::sleep(self.config.focus_delay).await;
        self.view.focus(field);
    }
}

/// Marks a submission as in flight until dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(pending: &'a AtomicBool) -> Option<Self> {
        (!pending.swap(true, Ordering::AcqRel)).then_some(Self(pending))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use folio_core_contact_form_contracts::MockContactFormView;
    use folio_core_notification_contracts::MockNotificationService;
    use folio_extern_contracts::contact_relay::MockContactRelayApiService;
    use folio_models::notification::NotificationId;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;
    use uuid::Uuid;

    use super::*;

    type Sut = ContactFormServiceImpl<
        MockNotificationService,
        MockContactFormView,
        MockContactRelayApiService,
    >;

    fn make_sut(
        notification: MockNotificationService,
        view: MockContactFormView,
        relay: Option<MockContactRelayApiService>,
    ) -> Sut {
        ContactFormServiceImpl::new(
            notification,
            view,
            relay,
            ContactFormServiceConfig {
                focus_delay: Duration::from_millis(220),
            },
        )
    }

    fn expect_notification(message: &str, variant: NotificationVariant) -> MockNotificationService {
        MockNotificationService::new().with_notify(
            message,
            NotificationOptions::variant(variant),
            NotificationId::from(Uuid::nil()),
        )
    }

    fn make_form() -> ContactForm {
        ContactForm {
            name: "  Ada ".into(),
            email: " ada@example.com ".into(),
            subject: None,
            message: " Hello, this is a test message. ".into(),
            hp: String::new(),
        }
    }

    fn make_request() -> ContactRelayRequest {
        ContactRelayRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: None,
            message: "Hello, this is a test message.".into(),
            hp: String::new(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let notification = expect_notification(SENT_MESSAGE, NotificationVariant::Success);
        let relay = MockContactRelayApiService::new().with_submit(make_request(), Ok(()));
        let sut = make_sut(notification, MockContactFormView::new(), Some(relay));

        // Act
        let result = sut.submit(make_form()).await;

        // Assert
        assert_eq!(result, ContactFormOutcome::Sent);
    }

    #[tokio::test]
    async fn ok_with_subject() {
        // Arrange
        let notification = expect_notification(SENT_MESSAGE, NotificationVariant::Success);
        let relay = MockContactRelayApiService::new().with_submit(
            ContactRelayRequest {
                subject: Some("Hi".into()),
                ..make_request()
            },
            Ok(()),
        );
        let sut = make_sut(notification, MockContactFormView::new(), Some(relay));

        // Act
        let result = sut
            .submit(ContactForm {
                subject: Some(" Hi ".into()),
                ..make_form()
            })
            .await;

        // Assert
        assert_eq!(result, ContactFormOutcome::Sent);
    }

    #[tokio::test]
    async fn without_relay() {
        // Arrange
        let notification = expect_notification(SENT_MESSAGE, NotificationVariant::Success);
        let sut = make_sut(notification, MockContactFormView::new(), None);

        // Act
        let result = sut.submit(make_form()).await;

        // Assert
        assert_eq!(result, ContactFormOutcome::Sent);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_email() {
        // Arrange
        let notification = expect_notification(INVALID_EMAIL_MESSAGE, NotificationVariant::Error);
        let view = MockContactFormView::new().with_highlight(ContactFormField::Email);
        let sut = make_sut(notification, view, Some(MockContactRelayApiService::new()));
        let start = Instant::now();

        // Act
        let result = sut
            .submit(ContactForm {
                email: "not-an-email".into(),
                ..make_form()
            })
            .await;

        // Assert
        assert_eq!(result, ContactFormOutcome::InvalidEmail);
        assert!(start.elapsed() >= Duration::from_millis(220));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_email_takes_priority() {
        // Arrange
        let notification = expect_notification(INVALID_EMAIL_MESSAGE, NotificationVariant::Error);
        let view = MockContactFormView::new().with_highlight(ContactFormField::Email);
        let sut = make_sut(notification, view, Some(MockContactRelayApiService::new()));

        // Act
        let result = sut
            .submit(ContactForm {
                email: "   ".into(),
                ..Default::default()
            })
            .await;

        // Assert
        assert_eq!(result, ContactFormOutcome::InvalidEmail);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_name() {
        // Arrange
        let notification =
            expect_notification(MISSING_FIELDS_MESSAGE, NotificationVariant::Error);
        let view = MockContactFormView::new().with_highlight(ContactFormField::Name);
        let sut = make_sut(notification, view, Some(MockContactRelayApiService::new()));

        // Act
        let result = sut
            .submit(ContactForm {
                name: "  ".into(),
                message: String::new(),
                ..make_form()
            })
            .await;

        // Assert
        assert_eq!(
            result,
            ContactFormOutcome::MissingField(ContactFormField::Name)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_message() {
        // Arrange
        let notification =
            expect_notification(MISSING_FIELDS_MESSAGE, NotificationVariant::Error);
        let view = MockContactFormView::new().with_highlight(ContactFormField::Message);
        let sut = make_sut(notification, view, Some(MockContactRelayApiService::new()));

        // Act
        let result = sut
            .submit(ContactForm {
                message: "\n".into(),
                ..make_form()
            })
            .await;

        // Assert
        assert_eq!(
            result,
            ContactFormOutcome::MissingField(ContactFormField::Message)
        );
    }

    #[tokio::test]
    async fn relay_rejected() {
        // Arrange
        let notification = expect_notification("Server not configured", NotificationVariant::Error);
        let relay = MockContactRelayApiService::new().with_submit(
            make_request(),
            Err(ContactRelayError::Rejected("Server not configured".into())),
        );
        let sut = make_sut(notification, MockContactFormView::new(), Some(relay));

        // Act
        let result = sut.submit(make_form()).await;

        // Assert
        assert_eq!(
            result,
            ContactFormOutcome::Failed("Server not configured".into())
        );
    }

    #[tokio::test]
    async fn relay_unreachable() {
        // Arrange
        let notification = expect_notification(FAILED_MESSAGE, NotificationVariant::Error);
        let relay = MockContactRelayApiService::new().with_submit(
            make_request(),
            Err(anyhow::anyhow!("connection refused").into()),
        );
        let sut = make_sut(notification, MockContactFormView::new(), Some(relay));

        // Act
        let result = sut.submit(make_form()).await;

        // Assert
        assert_eq!(result, ContactFormOutcome::Failed(FAILED_MESSAGE.into()));
    }

    #[tokio::test(start_paused = true)]
    async fn busy_while_pending() {
        // Arrange
        let notification = expect_notification(SENT_MESSAGE, NotificationVariant::Success)
            .with_notify(
                BUSY_MESSAGE,
                NotificationOptions::variant(NotificationVariant::Warning),
                NotificationId::from(Uuid::nil()),
            );
        let mut relay = MockContactRelayApiService::new();
        relay.expect_submit().once().return_once(|_| {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
        });
        let sut = make_sut(notification, MockContactFormView::new(), Some(relay));

        // Act
        let (first, second) = tokio::join!(sut.submit(make_form()), async {
            tokio::task::yield_now().await;
            sut.submit(make_form()).await
        });

        // Assert
        assert_eq!(first, ContactFormOutcome::Sent);
        assert_eq!(second, ContactFormOutcome::Busy);
        assert!(!sut.pending.load(Ordering::Acquire));
    }
}
