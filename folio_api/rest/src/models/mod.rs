use folio_models::contact::ContactIssues;
use serde::Serialize;

pub mod contact;

/// Body of every response of the contact api.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<ContactIssues>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
            issues: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            issues: None,
        }
    }

    pub fn with_issues(self, issues: ContactIssues) -> Self {
        Self {
            issues: Some(issues),
            ..self
        }
    }
}
