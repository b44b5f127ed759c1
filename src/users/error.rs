use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::model::ValidationError;

/// Broad classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    UniqueViolation,
    Connection,
    Other,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreErrorKind::UniqueViolation => "unique violation",
            StoreErrorKind::Connection => "connection",
            StoreErrorKind::Other => "database",
        };
        f.write_str(label)
    }
}

/// Failure reported by the user store, with the driver error kept as source.
#[derive(Debug, Error)]
#[error("{kind} error")]
pub struct StoreError {
    kind: StoreErrorKind,
    code: Option<String>,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl StoreError {
    pub fn new(
        kind: StoreErrorKind,
        code: Option<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            code,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// Native error code (SQLSTATE for Postgres) when the driver supplied one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_unique_violation(&self) -> bool {
        self.kind == StoreErrorKind::UniqueViolation
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, code) = match &err {
            sqlx::Error::Database(db_err) => {
                let kind = if db_err.is_unique_violation() {
                    StoreErrorKind::UniqueViolation
                } else {
                    StoreErrorKind::Other
                };
                (kind, db_err.code().map(|c| c.into_owned()))
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => (StoreErrorKind::Connection, None),
            _ => (StoreErrorKind::Other, None),
        };
        Self::new(kind, code, err)
    }
}

/// Failure of a create or update: either the input or the store said no.
#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
