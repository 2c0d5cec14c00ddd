//! Request validation against the book schemas.

use crate::error::AppError;
use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const ISBN_NOT_ALLOWED: &str = "ISBN not allowed in request body for book updates";

pub struct RequestValidator;

impl RequestValidator {
    /// Check `body` against `schema`, collecting every violation rather than stopping at the first.
    pub fn validate(body: &Value, schema: &Validator) -> Result<(), AppError> {
        let errors = violations(body, schema);
        if errors.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = errors.len(), "request body failed schema validation");
        Err(AppError::Validation(errors))
    }

    /// Validate, then convert into the typed payload.
    pub fn parse<T: DeserializeOwned>(mut body: Value, schema: &Validator) -> Result<T, AppError> {
        Self::validate(&body, schema)?;
        integral_floats_to_ints(&mut body);
        serde_json::from_value(body).map_err(|e| AppError::Validation(vec![format!("instance {}", e)]))
    }

    /// Updates are addressed by path; an `isbn` key in the body is refused outright.
    pub fn reject_identifier(body: &Value) -> Result<(), AppError> {
        if body.as_object().is_some_and(|m| m.contains_key("isbn")) {
            return Err(AppError::BadRequest(ISBN_NOT_ALLOWED.into()));
        }
        Ok(())
    }
}

/// One message per violated constraint, each prefixed with the offending field's path.
pub fn violations(body: &Value, schema: &Validator) -> Vec<String> {
    schema
        .iter_errors(body)
        .map(|e| format!("{} {}", field_path(&e.instance_path.to_string()), e))
        .collect()
}

/// The schema accepts `264.0` as an integer; rewrite such top-level values so they decode into `i32`.
fn integral_floats_to_ints(body: &mut Value) {
    let Some(map) = body.as_object_mut() else {
        return;
    };
    for v in map.values_mut() {
        let integral = match v {
            Value::Number(n) if n.is_f64() => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64),
            _ => None,
        };
        if let Some(f) = integral {
            *v = Value::from(f as i64);
        }
    }
}

/// `/pages` -> `instance.pages`; the root is `instance`.
fn field_path(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(String::from("instance"), |mut acc, segment| {
            acc.push('.');
            acc.push_str(&segment.replace("~1", "/").replace("~0", "~"));
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookPatch};
    use crate::schema::BookSchemas;
    use serde_json::json;

    fn good_book() -> Value {
        json!({
            "isbn": "0691161518",
            "amazon_url": "http://a.co/eobPtX2",
            "author": "Matthew Lane",
            "language": "english",
            "pages": 264,
            "publisher": "Princeton University Press",
            "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
            "year": 2017
        })
    }

    fn bad_book() -> Value {
        json!({
            "amazon_url": 123,
            "author": "Matthew Lane",
            "language": "english",
            "pages": "264",
            "publisher": "Princeton University Press",
            "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
            "year": true
        })
    }

    #[test]
    fn valid_book_passes_and_parses() {
        let schemas = BookSchemas::load().unwrap();
        let book: Book = RequestValidator::parse(good_book(), schemas.create()).unwrap();
        assert_eq!(book.pages, 264);
        assert_eq!(book.year, 2017);
    }

    #[test]
    fn create_collects_every_violation() {
        let schemas = BookSchemas::load().unwrap();
        let errors = violations(&bad_book(), schemas.create());
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|m| m.contains("isbn")));
        assert!(errors.iter().any(|m| m.starts_with("instance.amazon_url")));
        assert!(errors.iter().any(|m| m.starts_with("instance.pages")));
        assert!(errors.iter().any(|m| m.starts_with("instance.year")));
    }

    #[test]
    fn update_ignores_missing_fields_but_checks_types() {
        let schemas = BookSchemas::load().unwrap();
        assert!(violations(&json!({}), schemas.update()).is_empty());
        assert!(violations(&json!({ "title": "Level-Up" }), schemas.update()).is_empty());
        assert_eq!(violations(&bad_book(), schemas.update()).len(), 3);
    }

    #[test]
    fn validation_error_carries_messages() {
        let schemas = BookSchemas::load().unwrap();
        match RequestValidator::validate(&json!({ "pages": -1 }), schemas.update()) {
            Err(AppError::Validation(messages)) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].starts_with("instance.pages"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_body_is_a_violation() {
        let schemas = BookSchemas::load().unwrap();
        assert_eq!(violations(&json!([1, 2]), schemas.create()).len(), 1);
    }

    #[test]
    fn identifier_in_update_body_is_refused() {
        let err = RequestValidator::reject_identifier(&good_book()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == ISBN_NOT_ALLOWED));
        assert!(RequestValidator::reject_identifier(&json!({ "title": "x" })).is_ok());
        assert!(RequestValidator::reject_identifier(&json!("isbn")).is_ok());
    }

    #[test]
    fn out_of_range_integer_is_reported() {
        let schemas = BookSchemas::load().unwrap();
        let err = RequestValidator::parse::<BookPatch>(json!({ "pages": 1u64 << 40 }), schemas.update()).unwrap_err();
        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].starts_with("instance.pages"), "{messages:?}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn integral_floats_are_accepted_as_integers() {
        let schemas = BookSchemas::load().unwrap();
        let mut body = good_book();
        body["pages"] = json!(264.0);
        body["year"] = json!(2017.0);
        let book: Book = RequestValidator::parse(body, schemas.create()).unwrap();
        assert_eq!(book.pages, 264);
        assert_eq!(book.year, 2017);

        let patch: BookPatch = RequestValidator::parse(json!({ "pages": 10.0 }), schemas.update()).unwrap();
        assert_eq!(patch.pages, Some(10));
    }

    #[test]
    fn fractional_pages_name_the_field() {
        let schemas = BookSchemas::load().unwrap();
        let errors = violations(&json!({ "pages": 264.5 }), schemas.update());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("instance.pages"), "{errors:?}");
    }

    #[test]
    fn pointer_becomes_dotted_path() {
        assert_eq!(field_path(""), "instance");
        assert_eq!(field_path("/pages"), "instance.pages");
        assert_eq!(field_path("/a~1b/0"), "instance.a/b.0");
    }
}
