use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::util::envelope::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    MethodNotAllowed,
    Internal,
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::MethodNotAllowed => "MethodNotAllowed",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Failure leaving a handler. Always rendered as an error envelope.
#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Value,
}

impl HandlerError {
    pub fn new(error: HandlerErrorKind, message: impl Into<String>, details: impl Into<Value>) -> Self {
        HandlerError {
            error,
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: impl Into<Value>) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message, details)
    }

    pub fn not_found(message: impl Into<String>, details: impl Into<Value>) -> Self {
        Self::new(HandlerErrorKind::NotFound, message, details)
    }

    /// Map a service failure; `operation` is the message used when the
    /// failure carries none of its own (store errors).
    pub fn from_service(err: ServiceError, operation: &str) -> Self {
        match err {
            ServiceError::InvalidInput { message, details } => {
                Self::new(HandlerErrorKind::BadRequest, message, details)
            }
            ServiceError::NotFound { message, details } => {
                Self::new(HandlerErrorKind::NotFound, message, details)
            }
            ServiceError::Conflict { message, details } => {
                Self::new(HandlerErrorKind::Conflict, message, details)
            }
            ServiceError::Rejected(msg) => Self::new(HandlerErrorKind::BadRequest, operation, msg),
            ServiceError::InternalError(msg) => Self::new(HandlerErrorKind::Internal, operation, msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.error.status()
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Envelope::<()>::failure(self.message, status.as_u16(), self.details);
        (status, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid Input: {message}")]
    InvalidInput { message: String, details: Value },
    #[error("Not Found: {message}")]
    NotFound { message: String, details: Value },
    #[error("Conflict: {message}")]
    Conflict { message: String, details: Value },
    /// The store refused the write (bad value, failed cast).
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>, details: impl Into<Value>) -> Self {
        ServiceError::InvalidInput { message: message.into(), details: details.into() }
    }

    pub fn not_found(message: impl Into<String>, details: impl Into<Value>) -> Self {
        ServiceError::NotFound { message: message.into(), details: details.into() }
    }

    pub fn conflict(message: impl Into<String>, details: impl Into<Value>) -> Self {
        ServiceError::Conflict { message: message.into(), details: details.into() }
    }
}

// Allow conversion from RepositoryError to ServiceError
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::AlreadyExists(msg) => ServiceError::conflict("Duplicate key", msg),
            RepositoryError::ValidationError(msg) => ServiceError::Rejected(msg),
            RepositoryError::EncodingError(msg) => ServiceError::Rejected(msg),
            RepositoryError::DecodingError(msg) => ServiceError::InternalError(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

impl From<crate::util::storage::StorageError> for ServiceError {
    fn from(err: crate::util::storage::StorageError) -> Self {
        use crate::util::storage::StorageError;
        match err {
            StorageError::Rejected(msg) => ServiceError::invalid_input("Invalid upload", msg),
            other => ServiceError::InternalError(other.to_string()),
        }
    }
}
