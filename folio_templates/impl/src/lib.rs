use std::sync::Arc;

use anyhow::Context;
use folio_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(folio_utils::html::escape_html);

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to load template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use folio_models::contact::{
        ContactMessage, ContactMessageAuthor, ContactMessageAuthorName, ContactMessageContent,
        ContactMessageSubject,
    };
    use folio_templates_contracts::{ContactMessageHtmlTemplate, ContactMessageTextTemplate};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn contact_message_html() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactMessageHtmlTemplate {
            name: "<script>alert(1)</script>".into(),
            email: "ada@example.com".into(),
            subject: "Tom & Jerry's \"show\"".into(),
            message: "Hello,\nthis is a test message.".into(),
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(result.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!result.contains("<script>"));
        assert!(result.contains("Tom &amp; Jerry&#39;s &quot;show&quot;"));
        assert!(result.contains(r#"<a href="mailto:ada@example.com">ada@example.com</a>"#));
        assert!(result.contains("Hello,\nthis is a test message."));
    }

    #[test]
    fn contact_message_text() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactMessageTextTemplate {
            name: "Ada <Lovelace>".into(),
            email: "ada@example.com".into(),
            subject: "Hi & bye".into(),
            message: "Hello, this is a test message.".into(),
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert_eq!(
            result,
            "New message from Ada <Lovelace> <ada@example.com>\nSubject: Hi & bye\n\nHello, this is a test message."
        );
    }

    #[test]
    fn from_contact_message() {
        // Arrange
        let message = ContactMessage {
            author: ContactMessageAuthor {
                name: ContactMessageAuthorName::try_new("Ada").unwrap(),
                email: "ada@example.com".parse().unwrap(),
            },
            subject: ContactMessageSubject::try_new("Hi").unwrap(),
            content: ContactMessageContent::try_new("Hello, this is a test message.").unwrap(),
        };

        // Act
        let result = ContactMessageTextTemplate::from(&message);

        // Assert
        assert_eq!(result.name, "Ada");
        assert_eq!(result.email, "ada@example.com");
        assert_eq!(result.subject, "Hi");
        assert_eq!(result.message, "Hello, this is a test message.");
    }
}
