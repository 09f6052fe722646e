use std::{collections::BTreeMap, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::Serialize;

use crate::email_address::EmailAddress;

/// Subject used when the submitter did not provide one.
pub const DEFAULT_CONTACT_SUBJECT: &str = "New message from portfolio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

/// A validated contact form submission as received by the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub message: ContactMessage,
    pub honeypot: ContactHoneypot,
}

#[nutype(
    validate(len_char_min = 1, len_char_max = 80),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(len_char_max = 120, predicate = |email| is_valid_contact_email(email)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorEmail(String);

#[nutype(
    validate(len_char_max = 140),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 3000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Value of the hidden form field that humans never fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactHoneypot(pub String);

impl ContactHoneypot {
    /// Returns whether the submission was most likely sent by a bot.
    pub fn is_triggered(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

static CLIENT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

/// Strict email syntax accepted by the relay endpoint.
pub fn is_valid_contact_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && CONTACT_EMAIL_REGEX.is_match(email)
}

/// Lenient email syntax checked by the contact form before anything is sent.
pub fn is_plausible_email(email: &str) -> bool {
    CLIENT_EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
    Hp,
}

/// Field level validation issues of a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactIssues {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<ContactField, Vec<String>>,
}

impl ContactIssues {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: Default::default(),
        }
    }

    pub fn add(&mut self, field: ContactField, message: impl Into<String>) {
        self.field_errors
            .entry(field)
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

/// A raw field value as found in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFieldInput {
    Missing,
    Text(String),
    /// The field is present but not a string. Contains the name of the
    /// received type.
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmissionInput {
    pub name: ContactFieldInput,
    pub email: ContactFieldInput,
    pub subject: ContactFieldInput,
    pub message: ContactFieldInput,
    pub hp: ContactFieldInput,
}

impl Default for ContactSubmissionInput {
    fn default() -> Self {
        Self {
            name: ContactFieldInput::Missing,
            email: ContactFieldInput::Missing,
            subject: ContactFieldInput::Missing,
            message: ContactFieldInput::Missing,
            hp: ContactFieldInput::Missing,
        }
    }
}

impl ContactSubmission {
    /// Validates the raw submission, collecting the issues of all fields.
    pub fn parse(input: ContactSubmissionInput) -> Result<Self, ContactIssues> {
        let mut issues = ContactIssues::default();

        let name = required(&mut issues, ContactField::Name, input.name).and_then(|name| {
            ContactMessageAuthorName::try_new(name)
                .map_err(|err| {
                    use ContactMessageAuthorNameError as E;
                    let message = match err {
                        E::LenCharMinViolated => "Name required".into(),
                        E::LenCharMaxViolated => too_long(80),
                    };
                    issues.add(ContactField::Name, message);
                })
                .ok()
        });

        let email = required(&mut issues, ContactField::Email, input.email).and_then(|email| {
            // Every failed check is reported, syntax first.
            let syntax_ok = is_valid_contact_email(&email);
            if !syntax_ok {
                issues.add(ContactField::Email, "Invalid email");
            }
            if email.chars().count() > 120 {
                issues.add(ContactField::Email, too_long(120));
            }

            let email = ContactMessageAuthorEmail::try_new(email).ok()?;
            match email.parse::<EmailAddress>() {
                Ok(email) => Some(email),
                Err(_) => {
                    if syntax_ok {
                        issues.add(ContactField::Email, "Invalid email");
                    }
                    None
                }
            }
        });

        let subject = optional(&mut issues, ContactField::Subject, input.subject)
            .unwrap_or_else(|| DEFAULT_CONTACT_SUBJECT.into());
        let subject = ContactMessageSubject::try_new(subject)
            .map_err(|_| issues.add(ContactField::Subject, too_long(140)))
            .ok();

        let content =
            required(&mut issues, ContactField::Message, input.message).and_then(|content| {
                ContactMessageContent::try_new(content)
                    .map_err(|err| {
                        use ContactMessageContentError as E;
                        let message = match err {
                            E::LenCharMinViolated => "Please write at least 10 characters".into(),
                            E::LenCharMaxViolated => too_long(3000),
                        };
                        issues.add(ContactField::Message, message);
                    })
                    .ok()
            });

        let honeypot = optional(&mut issues, ContactField::Hp, input.hp).unwrap_or_default();

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) if issues.is_empty() => {
                Ok(Self {
                    message: ContactMessage {
                        author: ContactMessageAuthor { name, email },
                        subject,
                        content,
                    },
                    honeypot: ContactHoneypot(honeypot),
                })
            }
            _ => Err(issues),
        }
    }
}

fn required(
    issues: &mut ContactIssues,
    field: ContactField,
    input: ContactFieldInput,
) -> Option<String> {
    match input {
        ContactFieldInput::Missing => {
            issues.add(field, "Required");
            None
        }
        input => optional(issues, field, input),
    }
}

fn optional(
    issues: &mut ContactIssues,
    field: ContactField,
    input: ContactFieldInput,
) -> Option<String> {
    match input {
        ContactFieldInput::Missing => None,
        ContactFieldInput::Text(value) => Some(value),
        ContactFieldInput::Invalid(received) => {
            issues.add(field, format!("Expected string, received {received}"));
            None
        }
    }
}

fn too_long(max: usize) -> String {
    format!("String must contain at most {max} character(s)")
}
