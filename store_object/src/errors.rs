//! Error types for persistence operations
//!
//! Every DAO, query and data store in this crate fails with [`PersistenceError`].
//! Integrity violations are split out so callers can react to constraint breaches
//! without inspecting backend-specific error codes.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Which kind of constraint a backend reported as violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    NotNull,
    Check,
    Other,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::PrimaryKey => "primary key",
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
            ConstraintKind::Other => "integrity",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Integrity constraint violation ({constraint}): {message}")]
    IntegrityViolation {
        constraint: ConstraintKind,
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl PersistenceError {
    /// Build an integrity violation without an underlying cause
    pub fn integrity(constraint: ConstraintKind, message: impl Into<String>) -> Self {
        PersistenceError::IntegrityViolation {
            constraint,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a sqlx error, classifying constraint breaches as integrity violations
    pub fn database(operation: impl Into<String>, error: sqlx::Error) -> Self {
        let constraint = match &error {
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                sqlx::error::ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                sqlx::error::ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            },
            _ => None,
        };

        match constraint {
            Some(constraint) => PersistenceError::IntegrityViolation {
                constraint,
                message: format!("{} failed", operation.into()),
                source: Some(Box::new(error)),
            },
            None => PersistenceError::Database {
                operation: operation.into(),
                source: error,
            },
        }
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, PersistenceError::IntegrityViolation { .. })
    }

    /// The violated constraint, if this is an integrity violation
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            PersistenceError::IntegrityViolation { constraint, .. } => Some(*constraint),
            _ => None,
        }
    }
}

/// Render an error together with its `source()` chain, outermost first
pub fn cause_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
