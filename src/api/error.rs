// ==========================================
// League Availability - API errors
// ==========================================
// Responsibility: collapse repository failures into the four kinds
// callers act on, plus DeadlineExceeded.
//   NotFound          - rejected request, not retried
//   ValidationFailure - rejected before any write
//   StorageFailure    - transient, retry the whole operation
//   Conflict          - write-write conflict, retry
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    ValidationFailure(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Whether the caller should present this as "transient, retry".
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::StorageFailure(_) | ApiError::Conflict(_) | ApiError::DeadlineExceeded(_)
        )
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::ValidationFailure(message.into())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }

            // rejected input that reached the store
            RepositoryError::ValidationError(msg) => ApiError::ValidationFailure(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::ValidationFailure(format!("field {}: {}", field, message))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::ValidationFailure(format!("check constraint: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::NotFound(format!("referenced record missing: {}", msg))
            }

            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            RepositoryError::DeadlineExceeded(msg) => ApiError::DeadlineExceeded(msg),

            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::StorageFailure(msg),
            RepositoryError::LockError(msg) => {
                ApiError::StorageFailure(format!("connection lock poisoned: {}", msg))
            }

            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::not_found("Fixture", 42).into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Fixture"));
                assert!(msg.contains("42"));
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }

        let api_err: ApiError =
            RepositoryError::DatabaseTransactionError("database is locked".into()).into();
        assert!(matches!(api_err, ApiError::StorageFailure(_)));
        assert!(api_err.is_retryable());

        let api_err: ApiError =
            RepositoryError::CheckConstraintViolation("start_date <= end_date".into()).into();
        assert!(matches!(api_err, ApiError::ValidationFailure(_)));
        assert!(!api_err.is_retryable());
    }

    #[test]
    fn test_deadline_is_retryable() {
        let api_err: ApiError = RepositoryError::DeadlineExceeded("interrupted".into()).into();
        assert!(matches!(api_err, ApiError::DeadlineExceeded(_)));
        assert!(api_err.is_retryable());
    }
}
