use folio_models::contact::ContactMessage;
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// A template that can be rendered by the [`TemplateService`].
///
/// Templates whose name ends in `.html` are rendered with all variables
/// html-escaped. All other templates are rendered as plain text.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactMessageHtmlTemplate("contact_message.html"),
    ContactMessageTextTemplate("contact_message.txt"),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessageHtmlTemplate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessageTextTemplate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&ContactMessage> for ContactMessageHtmlTemplate {
    fn from(message: &ContactMessage) -> Self {
        Self {
            name: message.author.name.to_string(),
            email: message.author.email.to_string(),
            subject: message.subject.to_string(),
            message: message.content.to_string(),
        }
    }
}

impl From<&ContactMessage> for ContactMessageTextTemplate {
    fn from(message: &ContactMessage) -> Self {
        Self {
            name: message.author.name.to_string(),
            email: message.author.email.to_string(),
            subject: message.subject.to_string(),
            message: message.content.to_string(),
        }
    }
}
