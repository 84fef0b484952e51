// src/errors.rs
// DOCUMENTATION: Custom error types for the data-access layer
// PURPOSE: Centralized error handling, including PostgreSQL constraint classification

use thiserror::Error;
use validator::ValidationErrors;

/// SQLSTATE codes raised by the schema's constraints
pub mod sqlstate {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const CHECK_VIOLATION: &str = "23514";
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
    pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
}

/// Application-specific error types
/// DOCUMENTATION: Every repository operation returns this enum.
/// Constraint violations surfaced by PostgreSQL get their own variants
/// so callers can tell a duplicate email from a dangling reference.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    #[error("Missing required value: {0}")]
    NotNullViolation(String),

    #[error("Value outside allowed domain: {0}")]
    DomainViolation(String),

    #[error("Check constraint failed: {0}")]
    CheckViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No fields provided for update")]
    NoUpdateFields,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl PortalError {
    /// Map a SQLSTATE plus constraint name to the matching variant
    /// DOCUMENTATION: Falls back to DatabaseError for anything that is not
    /// one of the schema's own constraints
    pub fn from_sqlstate(code: Option<&str>, constraint: Option<&str>, message: &str) -> Self {
        let detail = constraint.unwrap_or(message).to_string();

        match code {
            Some(sqlstate::UNIQUE_VIOLATION) => PortalError::AlreadyExists(detail),
            Some(sqlstate::FOREIGN_KEY_VIOLATION) => PortalError::ForeignKeyViolation(detail),
            Some(sqlstate::NOT_NULL_VIOLATION) => {
                PortalError::NotNullViolation(message.to_string())
            }
            Some(sqlstate::CHECK_VIOLATION) => PortalError::CheckViolation(detail),
            Some(sqlstate::INVALID_TEXT_REPRESENTATION) => {
                PortalError::DomainViolation(message.to_string())
            }
            Some(sqlstate::NUMERIC_VALUE_OUT_OF_RANGE) => {
                PortalError::InvalidInput(message.to_string())
            }
            _ => PortalError::DatabaseError(message.to_string()),
        }
    }

    /// True for failures caused by the data rather than the database
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            PortalError::AlreadyExists(_)
                | PortalError::ForeignKeyViolation(_)
                | PortalError::NotNullViolation(_)
                | PortalError::DomainViolation(_)
                | PortalError::CheckViolation(_)
        )
    }
}

impl From<sqlx::Error> for PortalError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PortalError::NotFound("row".to_string()),
            sqlx::Error::Database(db_err) => PortalError::from_sqlstate(
                db_err.code().as_deref(),
                db_err.constraint(),
                db_err.message(),
            ),
            other => PortalError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for PortalError {
    fn from(err: ValidationErrors) -> Self {
        PortalError::ValidationError(err.to_string())
    }
}
