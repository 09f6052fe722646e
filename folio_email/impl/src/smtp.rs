use std::time::Duration;

use anyhow::{anyhow, Context};
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::email_address::EmailAddressWithName;
use folio_utils::Apply;
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Delivers emails to an smtp server.
#[derive(Debug, Clone)]
pub struct SmtpEmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName, timeout: Duration) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .timeout(Some(timeout))
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let builder = email
            .recipients
            .into_iter()
            .fold(Message::builder().from(self.from.0.clone()), |builder, recipient| {
                builder.to(recipient.0)
            })
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject);

        match email.html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(email.text, html)),
            None => builder.header(ContentType::TEXT_PLAIN).body(email.text),
        }
        .map_err(Into::into)
    }
}

impl EmailService for SmtpEmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to send email via smtp")?;

        if response.is_positive() {
            Ok(())
        } else {
            let message = response.message().collect::<Vec<_>>().join(" ");
            Err(EmailSendError::Rejected(message))
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }

    fn is_configured(&self) -> bool {
        true
    }
}
