use serde::Serialize;
use thiserror::Error;

use super::domain::UserId;
use crate::errors::StoreError;

/// One rejected request field, as reported by the boundary's payload validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub rejected_value: String,
    pub message: String,
}

/// Business errors for user workflows
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found with id: {0}")]
    NotFound(UserId),
    #[error("Email already exists: {0}")]
    Conflict(String),
    #[error("Validation failure")]
    Validation(Vec<FieldViolation>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UserError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            UserError::Validation(_) => 2001,
            UserError::Conflict(_) => 2002,
            UserError::NotFound(_) => 2003,
            UserError::Store(StoreError::Integrity(_)) => 2101,
            UserError::Store(StoreError::Backend(_)) => 2102,
        }
    }

    /// Reclassify a failed `save`: an integrity violation means the email was claimed by another
    /// writer after the pre-check. Other store failures pass through untouched.
    pub(crate) fn from_save(err: StoreError, email: &str) -> Self {
        match err {
            StoreError::Integrity(_) => UserError::Conflict(email.to_string()),
            other => UserError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(UserError::NotFound(99).to_string(), "User not found with id: 99");
        assert_eq!(UserError::Conflict("a@x.io".into()).to_string(), "Email already exists: a@x.io");
    }

    #[test]
    fn save_integrity_violation_becomes_conflict() {
        let err = UserError::from_save(StoreError::Integrity("uniq_users_email_lower".into()), "a@x.io");
        assert!(matches!(err, UserError::Conflict(email) if email == "a@x.io"));
    }

    #[test]
    fn save_backend_failure_passes_through() {
        let err = UserError::from_save(StoreError::Backend("timeout".into()), "a@x.io");
        assert!(matches!(err, UserError::Store(StoreError::Backend(_))));
        assert_eq!(err.code(), 2102);
    }
}
