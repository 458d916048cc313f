use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure reported by a store gateway.
///
/// Only `Integrity` carries meaning for the service layer; everything else is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("integrity constraint violated: {0}")]
    Integrity(String),
    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, StoreError::Integrity(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Integrity(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => StoreError::Integrity(detail),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}
