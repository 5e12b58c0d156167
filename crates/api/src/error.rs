//! API error types with HTTP response mapping.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// One entry of a 422 response's `details` array.
///
/// `location` is the path to the offending value, starting at `"body"`,
/// e.g. `["body", "message"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: Vec<String>,
    pub message: String,
    pub kind: &'static str,
}

impl FieldError {
    /// Error located at the whole body.
    pub fn body(message: impl Into<String>, kind: &'static str) -> Self {
        Self {
            location: vec!["body".to_string()],
            message: message.into(),
            kind,
        }
    }

    /// Error located at a top-level field of the body.
    pub fn field(field: &str, message: impl Into<String>, kind: &'static str) -> Self {
        Self {
            location: vec!["body".to_string(), field.to_string()],
            message: message.into(),
            kind,
        }
    }
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed to deserialize into the expected shape.
    #[error("Request validation failed")]
    Validation(Vec<FieldError>),
    /// The body could not be read at all (size limit, broken stream).
    #[error("{message}")]
    UnreadableBody { status: StatusCode, message: String },
    /// One or more readiness probes failed.
    #[error("Service not ready")]
    NotReady,
    /// No route matched.
    #[error("Not Found")]
    NotFound,
    /// Unexpected fault; the detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnreadableBody { status, .. } => *status,
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            ApiError::Validation(details) => {
                tracing::debug!(?details, "request validation failed");
                serde_json::json!({ "error": message, "details": details })
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                serde_json::json!({ "error": message })
            }
            ApiError::UnreadableBody { .. } | ApiError::NotReady | ApiError::NotFound => {
                serde_json::json!({ "error": message })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Body rejections keep axum's status when the bytes never arrived
/// (413 over the body limit, 400 on a broken stream); everything else is 422.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::BytesRejection(_) => {
                return ApiError::UnreadableBody {
                    status: rejection.status(),
                    message: rejection.body_text(),
                };
            }
            JsonRejection::JsonDataError(_) => "invalid_data",
            JsonRejection::JsonSyntaxError(_) => "invalid_json",
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            _ => "invalid_body",
        };
        ApiError::Validation(vec![FieldError::body(rejection.body_text(), kind)])
    }
}

/// Maps a caught handler panic to the generic 500 response.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let response = ApiError::Internal("database exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(!json.to_string().contains("exploded"));
    }

    #[tokio::test]
    async fn not_ready_is_503() {
        let response = ApiError::NotReady.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["error"], "Service not ready");
    }

    #[tokio::test]
    async fn validation_error_carries_details() {
        let err = ApiError::Validation(vec![FieldError::field(
            "message",
            "Field required",
            "missing",
        )]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(
            json["details"][0]["location"],
            serde_json::json!(["body", "message"])
        );
        assert_eq!(json["details"][0]["kind"], "missing");
    }

    #[tokio::test]
    async fn unreadable_body_keeps_its_status() {
        let err = ApiError::UnreadableBody {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "length limit exceeded");
    }

    #[tokio::test]
    async fn panic_payloads_map_to_generic_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
