//! Message processing endpoint.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde_json::Value;

use crate::clock;
use crate::error::{ApiError, FieldError};

/// Request bodies checked field by field, so every failure names its field.
pub trait FromBody: Sized {
    fn from_body(body: Value) -> Result<Self, Vec<FieldError>>;
}

#[derive(Debug)]
pub struct MessageRequest {
    pub message: String,
}

impl FromBody for MessageRequest {
    fn from_body(body: Value) -> Result<Self, Vec<FieldError>> {
        let Value::Object(mut fields) = body else {
            return Err(vec![FieldError::body(
                "Input should be a valid JSON object",
                "object_type",
            )]);
        };
        match fields.remove("message") {
            Some(Value::String(message)) => Ok(Self { message }),
            Some(_) => Err(vec![FieldError::field(
                "message",
                "Input should be a valid string",
                "string_type",
            )]),
            None => Err(vec![FieldError::field(
                "message",
                "Field required",
                "missing",
            )]),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub original: String,
    pub processed: String,
    pub length: usize,
    pub timestamp: String,
}

/// JSON body extractor whose rejections become [`ApiError`]s.
///
/// Parsing and field checks are separate steps: malformed JSON is reported
/// against the body, shape errors against the field that caused them.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: FromBody,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        T::from_body(body).map(Self).map_err(ApiError::Validation)
    }
}

/// POST /api/process — trims and uppercases the message.
#[tracing::instrument(skip_all)]
pub async fn process(
    ValidatedJson(req): ValidatedJson<MessageRequest>,
) -> Json<MessageResponse> {
    let processed = transform(&req.message);
    let length = processed.chars().count();

    tracing::info!(original = %req.message, processed = %processed, "processed message");

    Json(MessageResponse {
        original: req.message,
        processed,
        length,
        timestamp: clock::timestamp(),
    })
}

/// Trims surrounding whitespace, then uppercases.
pub fn transform(message: &str) -> String {
    message.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_request_accepts_string() {
        let req = MessageRequest::from_body(json!({ "message": "hi", "extra": 1 })).unwrap();
        assert_eq!(req.message, "hi");
    }

    #[test]
    fn message_request_reports_missing_field() {
        let errors = MessageRequest::from_body(json!({})).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::field("message", "Field required", "missing")]
        );
    }

    #[test]
    fn message_request_reports_wrong_type() {
        let errors = MessageRequest::from_body(json!({ "message": 42 })).unwrap_err();
        assert_eq!(errors[0].location, ["body", "message"]);
        assert_eq!(errors[0].kind, "string_type");
    }

    #[test]
    fn message_request_rejects_non_object() {
        let errors = MessageRequest::from_body(json!(["hello"])).unwrap_err();
        assert_eq!(errors[0].location, ["body"]);
        assert_eq!(errors[0].kind, "object_type");
    }

    #[test]
    fn transform_uppercases() {
        assert_eq!(transform("hello world"), "HELLO WORLD");
    }

    #[test]
    fn transform_trims_whitespace() {
        assert_eq!(transform("  test message  "), "TEST MESSAGE");
        assert_eq!(transform("\t\nline\n"), "LINE");
    }

    #[test]
    fn transform_empty() {
        assert_eq!(transform(""), "");
        assert_eq!(transform("   "), "");
    }

    #[test]
    fn transform_handles_multibyte() {
        let processed = transform(" straße ");
        assert_eq!(processed, "STRASSE");
        assert_eq!(transform("héllo").chars().count(), 5);
    }
}
