use std::{fmt, future::Future};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Validate the form and forward it to the contact relay.
    ///
    /// Every submission results in exactly one notification.
    fn submit(&self, form: ContactForm) -> impl Future<Output = ContactFormOutcome> + Send;
}

/// The field values of the contact form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    /// The hidden honeypot field.
    pub hp: String,
}

/// The form fields that can be highlighted after a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactFormField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFormOutcome {
    InvalidEmail,
    MissingField(ContactFormField),
    Sent,
    /// The relay failed. Contains the message shown to the user.
    Failed(String),
    /// An earlier submission is still in flight.
    Busy,
}

/// The part of the user interface that renders the form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormView: Send + Sync + 'static {
    fn scroll_into_view(&self, field: ContactFormField);

    fn focus(&self, field: ContactFormField);
}

#[cfg(feature = "mock")]
impl MockContactFormView {
    /// Expect the field to be scrolled into view and focused afterwards.
    pub fn with_highlight(mut self, field: ContactFormField) -> Self {
        let mut seq = mockall::Sequence::new();
        self.expect_scroll_into_view()
            .once()
            .in_sequence(&mut seq)
            .with(mockall::predicate::eq(field))
            .return_const(());
        self.expect_focus()
            .once()
            .in_sequence(&mut seq)
            .with(mockall::predicate::eq(field))
            .return_const(());
        self
    }
}
