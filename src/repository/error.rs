// ==========================================
// League Availability - Repository errors
// ==========================================
// thiserror-derived; rusqlite failures are classified here once
// so callers can match on kinds instead of message text.
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

/// Repository layer error
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Lookup =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== Database =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("check constraint violated: {0}")]
    CheckConstraintViolation(String),

    // ===== Cancellation =====
    #[error("operation deadline exceeded or cancelled: {0}")]
    DeadlineExceeded(String),

    // ===== Data quality =====
    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("stored value invalid (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== General =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg) => {
                let msg = msg.clone().unwrap_or_else(|| err.to_string());
                match code.code {
                    ErrorCode::OperationInterrupted => RepositoryError::DeadlineExceeded(msg),
                    ErrorCode::ConstraintViolation => {
                        if msg.contains("UNIQUE") {
                            RepositoryError::UniqueConstraintViolation(msg)
                        } else if msg.contains("FOREIGN KEY") {
                            RepositoryError::ForeignKeyViolation(msg)
                        } else if msg.contains("CHECK") {
                            RepositoryError::CheckConstraintViolation(msg)
                        } else {
                            RepositoryError::DatabaseQueryError(msg)
                        }
                    }
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                        RepositoryError::DatabaseTransactionError(msg)
                    }
                    ErrorCode::CannotOpen => RepositoryError::DatabaseConnectionError(msg),
                    _ => RepositoryError::DatabaseQueryError(msg),
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: ErrorCode, extended: i32, msg: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code,
                extended_code: extended,
            },
            Some(msg.to_string()),
        )
    }

    #[test]
    fn test_interrupt_maps_to_deadline() {
        let err: RepositoryError =
            sqlite_failure(ErrorCode::OperationInterrupted, 9, "interrupted").into();
        assert!(matches!(err, RepositoryError::DeadlineExceeded(_)));
    }

    #[test]
    fn test_constraint_kinds_are_classified() {
        let err: RepositoryError = sqlite_failure(
            ErrorCode::ConstraintViolation,
            2067,
            "UNIQUE constraint failed: player_divisions.player_id",
        )
        .into();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

        let err: RepositoryError = sqlite_failure(
            ErrorCode::ConstraintViolation,
            275,
            "CHECK constraint failed: status IN ('Available')",
        )
        .into();
        assert!(matches!(err, RepositoryError::CheckConstraintViolation(_)));
    }

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err: RepositoryError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
