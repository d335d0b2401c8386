use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{errors::ServiceError, CategoryError};
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{"error": kind, "code": n, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, code: u16, message: impl Into<String>) -> Self {
        Self { status, kind, code, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", 2300, message)
    }
}

impl From<CategoryError> for ApiError {
    fn from(e: CategoryError) -> Self {
        let status = match &e {
            CategoryError::InvalidName
            | CategoryError::SelfParent
            | CategoryError::CircularReference
            | CategoryError::HasChildren => StatusCode::BAD_REQUEST,
            CategoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            CategoryError::DuplicateName { .. } | CategoryError::ConstraintViolation(_) => StatusCode::CONFLICT,
            CategoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, e.kind(), e.code(), e.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", 2400, other.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self { Self::bad_request(e.body_text()) }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        let status = match e {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, "bad_request", 2300, e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, kind = self.kind, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, kind = self.kind, error = %self.message, "request rejected");
        }
        let body = serde_json::json!({"error": self.kind, "code": self.code, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
