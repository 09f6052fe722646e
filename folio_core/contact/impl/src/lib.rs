use std::{sync::Arc, time::Duration};

use folio_core_contact_contracts::{ContactDelivery, ContactSendMessageError, ContactService};
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use folio_templates_contracts::{
    ContactMessageHtmlTemplate, ContactMessageTextTemplate, TemplateService,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    pub email: Email,
    pub template: Template,
    pub config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Recipients of relayed messages. Empty if none are configured.
    pub recipients: Arc<[EmailAddressWithName]>,
    pub send_timeout: Duration,
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactDelivery, ContactSendMessageError> {
        if submission.honeypot.is_triggered() {
            debug!("Discarding contact message with filled honeypot");
            return Ok(ContactDelivery::Discarded);
        }

        if self.config.recipients.is_empty() || !self.email.is_configured() {
            warn!("Cannot relay contact message, email delivery is not configured");
            return Err(ContactSendMessageError::NotConfigured);
        }

        let message = submission.message;
        let html = self
            .template
            .render(&ContactMessageHtmlTemplate::from(&message))?;
        let text = self
            .template
            .render(&ContactMessageTextTemplate::from(&message))?;

        let email = Email {
            recipients: self.config.recipients.to_vec(),
            subject: message.subject.into_inner(),
            text,
            html: Some(html),
            reply_to: Some(message.author.email.into()),
        };

        match tokio::time::timeout(self.config.send_timeout, self.email.send(email)).await {
            Ok(Ok(())) => {
                info!("Relayed contact message");
                Ok(ContactDelivery::Sent)
            }
            Ok(Err(EmailSendError::Rejected(reason))) => {
                warn!(%reason, "Email provider rejected contact message");
                Err(ContactSendMessageError::Send {
                    reason: Some(reason),
                })
            }
            Ok(Err(EmailSendError::Other(err))) => {
                warn!("Failed to send contact message: {err:#}");
                Err(ContactSendMessageError::Send { reason: None })
            }
            Err(_) => {
                warn!(
                    timeout = ?self.config.send_timeout,
                    "Timed out sending contact message"
                );
                Err(ContactSendMessageError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_email_contracts::MockEmailService;
    use folio_models::contact::{
        ContactHoneypot, ContactMessage, ContactMessageAuthor, DEFAULT_CONTACT_SUBJECT,
    };
    use folio_templates_contracts::MockTemplateService;
    use folio_utils::assert_matches;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new()
            .with_is_configured(true)
            .with_send(make_email(&config), Ok(()));
        let template = make_template();

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        assert_eq!(result.unwrap(), ContactDelivery::Sent);
    }

    #[tokio::test]
    async fn honeypot() {
        // Arrange
        let sut = ContactServiceImpl {
            email: MockEmailService::new(),
            template: MockTemplateService::new(),
            config: make_config(),
        };

        // Act
        let result = sut.send_message(make_submission("I am a bot")).await;

        // Assert
        assert_eq!(result.unwrap(), ContactDelivery::Discarded);
    }

    #[tokio::test]
    async fn whitespace_honeypot_is_ignored() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new()
            .with_is_configured(true)
            .with_send(make_email(&config), Ok(()));

        let sut = ContactServiceImpl {
            email,
            template: make_template(),
            config,
        };

        // Act
        let result = sut.send_message(make_submission("  \t")).await;

        // Assert
        assert_eq!(result.unwrap(), ContactDelivery::Sent);
    }

    #[tokio::test]
    async fn no_recipients() {
        // Arrange
        let sut = ContactServiceImpl {
            email: MockEmailService::new().with_is_configured(true),
            template: MockTemplateService::new(),
            config: ContactServiceConfig {
                recipients: Vec::new().into(),
                ..make_config()
            },
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::NotConfigured));
    }

    #[tokio::test]
    async fn email_not_configured() {
        // Arrange
        let sut = ContactServiceImpl {
            email: MockEmailService::new().with_is_configured(false),
            template: MockTemplateService::new(),
            config: make_config(),
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::NotConfigured));
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new().with_is_configured(true).with_send(
            make_email(&config),
            Err(EmailSendError::Rejected("Invalid `to` field".into())),
        );

        let sut = ContactServiceImpl {
            email,
            template: make_template(),
            config,
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Invalid `to` field");
        assert_matches!(err, ContactSendMessageError::Send { reason: Some(_) });
    }

    #[tokio::test]
    async fn transport_error() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new().with_is_configured(true).with_send(
            make_email(&config),
            Err(anyhow::anyhow!("connection refused").into()),
        );

        let sut = ContactServiceImpl {
            email,
            template: make_template(),
            config,
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Send failed");
        assert_matches!(err, ContactSendMessageError::Send { reason: None });
    }

    #[tokio::test(start_paused = true)]
    async fn timeout() {
        // Arrange
        let config = make_config();
        let mut email = MockEmailService::new().with_is_configured(true);
        email
            .expect_send()
            .once()
            .return_once(|_| Box::pin(std::future::pending()));

        let sut = ContactServiceImpl {
            email,
            template: make_template(),
            config,
        };

        // Act
        let result = sut.send_message(make_submission("")).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Send timed out");
        assert_matches!(err, ContactSendMessageError::Timeout);
    }

    fn make_config() -> ContactServiceConfig {
        ContactServiceConfig {
            recipients: [
                "me@example.com".parse().unwrap(),
                "Other <you@example.com>".parse().unwrap(),
            ]
            .into(),
            send_timeout: Duration::from_secs(15),
        }
    }

    fn make_message() -> ContactMessage {
        ContactMessage {
            author: ContactMessageAuthor {
                name: "Ada".try_into().unwrap(),
                email: "ada@example.com".parse().unwrap(),
            },
            subject: DEFAULT_CONTACT_SUBJECT.try_into().unwrap(),
            content: "Hello, this is a test message.".try_into().unwrap(),
        }
    }

    fn make_submission(honeypot: &str) -> ContactSubmission {
        ContactSubmission {
            message: make_message(),
            honeypot: ContactHoneypot(honeypot.into()),
        }
    }

    fn make_template() -> MockTemplateService {
        let message = make_message();
        MockTemplateService::new()
            .with_render(
                ContactMessageHtmlTemplate::from(&message),
                "<p>html</p>".into(),
            )
            .with_render(ContactMessageTextTemplate::from(&message), "text".into())
    }

    fn make_email(config: &ContactServiceConfig) -> Email {
        Email {
            recipients: config.recipients.to_vec(),
            subject: DEFAULT_CONTACT_SUBJECT.into(),
            text: "text".into(),
            html: Some("<p>html</p>".into()),
            reply_to: Some("ada@example.com".parse().unwrap()),
        }
    }
}
