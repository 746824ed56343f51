use super::state::ApiStateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hhub_database::DatabaseError;
use hhub_derive::api_model;
use hhub_domain::ValidationError;
use std::borrow::Cow;
use tracing::error;

const INTERNAL_MESSAGE: &str = "Internal server error";

pub type ApiResult<T> = Result<T, ApiError>;

/// Single-message error body, e.g. `{"error": "Hero not found"}`.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Multi-message error body, e.g. `{"errors": ["Invalid request"]}`.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

/// Errors a handler can return. Each maps to a fixed status and body shape.
#[hhub_derive::hhub_error]
pub enum ApiError {
    /// 404 with `{"error": "<Entity> not found"}`.
    #[error("{entity} not found{}", format_context(.context))]
    NotFound { entity: &'static str, context: Option<Cow<'static, str>> },

    /// 422 with every rule violation.
    #[error("Validation failed{}: {}", format_context(.context), .messages.join(", "))]
    Validation { messages: Vec<String>, context: Option<Cow<'static, str>> },

    /// 400: unparseable body, path or missing required keys.
    #[error("Malformed request{}: {}", format_context(.context), .messages.join(", "))]
    MalformedRequest { messages: Vec<String>, context: Option<Cow<'static, str>> },

    #[error("State error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal API error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    #[must_use]
    pub const fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity, context: None }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { messages: vec![message.into()], context: None }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest { messages: vec![message.into()], context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            Self::State { .. } | Self::Database { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound { entity, .. } => {
                (status, axum::Json(ErrorBody { error: format!("{entity} not found") }))
                    .into_response()
            }
            Self::Validation { messages, .. } | Self::MalformedRequest { messages, .. } => {
                (status, axum::Json(ErrorsBody { errors: messages })).into_response()
            }
            err @ (Self::State { .. } | Self::Database { .. } | Self::Internal { .. }) => {
                error!(error = %err, "Request failed");
                (status, axum::Json(ErrorBody { error: INTERNAL_MESSAGE.to_owned() }))
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn not_found_uses_single_error_key() {
        let response = ApiError::not_found("Hero").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, serde_json::json!({ "error": "Hero not found" }));
    }

    #[tokio::test]
    async fn validation_lists_every_message() {
        let err = ApiError::Validation {
            messages: vec!["a".to_owned(), "b".to_owned()],
            context: Some("PATCH /powers/1".into()),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await, serde_json::json!({ "errors": ["a", "b"] }));
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let response = ApiError::from("connection reset").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Internal server error" })
        );
    }

    #[test]
    fn domain_validation_errors_become_422() {
        let err: ApiError = ValidationError::DescriptionTooShort { length: 3 }.into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_string(),
            "Validation failed: Description must be at least 20 characters long"
        );
    }
}
