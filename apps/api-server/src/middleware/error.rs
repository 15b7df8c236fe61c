//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use agora_core::{DomainError, RepoError, ServiceError};
use agora_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(400, "Validation Failed").with_detail(errors.join(", "))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::NotFound {
                entity_type: "comment",
                ..
            } => AppError::NotFound("Comment does not exist".to_string()),
            DomainError::NotFound { .. } => AppError::NotFound("Product not found".to_string()),
            DomainError::NotAuthorized => AppError::Unauthorized(err.to_string()),
            DomainError::Conflict { .. } => AppError::Conflict(err.to_string()),
            DomainError::AlreadyLiked
            | DomainError::NotLiked
            | DomainError::BidTooLow { .. }
            | DomainError::BidNotHighest { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Conflict { .. } => AppError::Conflict(err.to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Serialization(msg) => {
                tracing::error!("Stored product could not be decoded: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => e.into(),
            ServiceError::Repo(e) => e.into(),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (DomainError::validation("Text is required"), StatusCode::BAD_REQUEST),
            (DomainError::AlreadyLiked, StatusCode::BAD_REQUEST),
            (DomainError::NotLiked, StatusCode::BAD_REQUEST),
            (
                DomainError::BidTooLow {
                    offered: 1.0,
                    minimum: 2.0,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::BidNotHighest {
                    offered: 3.0,
                    highest: 4.0,
                },
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::product_not_found(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::comment_not_found(Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::NotAuthorized, StatusCode::UNAUTHORIZED),
            (DomainError::Conflict { id: Uuid::nil() }, StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_store_failures_are_internal() {
        let err = AppError::from(ServiceError::Repo(RepoError::Query("boom".to_string())));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_comment_not_found_message() {
        let err = AppError::from(DomainError::comment_not_found(Uuid::nil()));

        assert!(matches!(err, AppError::NotFound(msg) if msg == "Comment does not exist"));
    }
}
