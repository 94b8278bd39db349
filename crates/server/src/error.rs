//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use medimeet_core::TransitionError;

use crate::db::RepositoryError;
use crate::identity::IdentityError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Identity provider operation failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Caller's claimed identity does not match the verified identity,
    /// or no verifiable identity was presented.
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller's stored role does not permit the operation.
    #[error("Access denied")]
    AccessDenied,

    /// Missing or invalid input fields.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No local record has been provisioned for this identity.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// JSON error body matching the platform wire format.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
                | Self::Internal(_)
                | Self::Identity(
                    IdentityError::Http(_)
                        | IdentityError::UnexpectedStatus(_)
                        | IdentityError::InvalidResponse(_)
                )
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Identity(err) => match err {
                IdentityError::InvalidToken | IdentityError::MissingToken => {
                    StatusCode::UNAUTHORIZED
                }
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "Not found".to_string(),
                RepositoryError::Conflict(msg) => msg.clone(),
                _ => "Internal server error".to_string(),
            },
            Self::Identity(err) => match err {
                IdentityError::InvalidToken | IdentityError::MissingToken => {
                    "Unauthorized".to_string()
                }
                _ => "Identity provider error".to_string(),
            },
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::AccessDenied => "Access denied".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an identity id.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(identity_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(identity_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("User not found in database".to_string());
        assert_eq!(err.to_string(), "Not found: User not found in database");

        let err = AppError::BadRequest("Invalid role selection".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid role selection");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AppError::AccessDenied), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "slot already booked".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "bad email".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_identity_error_mapping() {
        assert_eq!(
            get_status(AppError::Identity(IdentityError::InvalidToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Identity(IdentityError::MissingToken)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_transition_error_becomes_bad_request() {
        let err: AppError =
            TransitionError::InvalidRoleSelection("ADMIN".to_string()).into();
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }
}
