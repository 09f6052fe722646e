use std::collections::HashMap;

use folio_models::contact::{ContactFieldInput, ContactIssues, ContactSubmissionInput};
use serde_json::{Map, Value};

/// Reads a contact submission from a request body.
///
/// The body is parsed as json first and as an url encoded form if that
/// fails, regardless of the declared content type. Bodies that are neither
/// yield a submission without any fields.
pub fn parse_body(body: &[u8]) -> Result<ContactSubmissionInput, ContactIssues> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(from_json(object)),
        Ok(other) => Err(ContactIssues::form(format!(
            "Expected object, received {}",
            type_name(&other)
        ))),
        Err(_) => Ok(from_form(body)),
    }
}

fn from_json(mut object: Map<String, Value>) -> ContactSubmissionInput {
    let mut field = |key: &str| match object.remove(key) {
        None => ContactFieldInput::Missing,
        Some(Value::String(value)) => ContactFieldInput::Text(value),
        Some(other) => ContactFieldInput::Invalid(type_name(&other)),
    };

    ContactSubmissionInput {
        name: field("name"),
        email: field("email"),
        subject: field("subject"),
        message: field("message"),
        hp: field("hp"),
    }
}

fn from_form(body: &[u8]) -> ContactSubmissionInput {
    // Later occurrences of a key override earlier ones.
    let mut form = url::form_urlencoded::parse(body)
        .into_owned()
        .collect::<HashMap<_, _>>();
    let mut field = |key: &str| {
        form.remove(key)
            .map_or(ContactFieldInput::Missing, ContactFieldInput::Text)
    };

    ContactSubmissionInput {
        name: field("name"),
        email: field("email"),
        subject: field("subject"),
        message: field("message"),
        hp: field("hp"),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> ContactFieldInput {
        ContactFieldInput::Text(s.into())
    }

    #[test]
    fn json() {
        let body = br#"{"name":"Ada","email":"ada@example.com","message":"Hi","hp":"","extra":1}"#;

        let result = parse_body(body).unwrap();

        assert_eq!(
            result,
            ContactSubmissionInput {
                name: text("Ada"),
                email: text("ada@example.com"),
                subject: ContactFieldInput::Missing,
                message: text("Hi"),
                hp: text(""),
            }
        );
    }

    #[test]
    fn json_wrong_types() {
        let body = br#"{"name":42,"email":null,"subject":["a"],"message":{},"hp":true}"#;

        let result = parse_body(body).unwrap();

        assert_eq!(
            result,
            ContactSubmissionInput {
                name: ContactFieldInput::Invalid("number"),
                email: ContactFieldInput::Invalid("null"),
                subject: ContactFieldInput::Invalid("array"),
                message: ContactFieldInput::Invalid("object"),
                hp: ContactFieldInput::Invalid("boolean"),
            }
        );
    }

    #[test]
    fn json_not_an_object() {
        for (body, expected) in [
            (&b"[1, 2]"[..], "Expected object, received array"),
            (&b"\"hello\""[..], "Expected object, received string"),
            (&b"null"[..], "Expected object, received null"),
            (&b"7"[..], "Expected object, received number"),
        ] {
            let result = parse_body(body).unwrap_err();
            assert_eq!(result, ContactIssues::form(expected));
        }
    }

    #[test]
    fn urlencoded() {
        let body = b"name=Ada+Lovelace&email=ada%40example.com&message=Hello%2C+world&name=Ada";

        let result = parse_body(body).unwrap();

        assert_eq!(
            result,
            ContactSubmissionInput {
                name: text("Ada"),
                email: text("ada@example.com"),
                subject: ContactFieldInput::Missing,
                message: text("Hello, world"),
                hp: ContactFieldInput::Missing,
            }
        );
    }

    #[test]
    fn empty_or_garbage() {
        for body in [&b""[..], &b"{not json"[..], &b"hello"[..]] {
            let result = parse_body(body).unwrap();
            assert_eq!(result, ContactSubmissionInput::default());
        }
    }
}
