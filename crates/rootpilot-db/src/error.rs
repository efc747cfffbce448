//! Store-specific error types and conversions.

use rootpilot_core::error::RootPilotError;

/// Store-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} status is {current}")]
    StatusMismatch {
        entity: &'static str,
        current: String,
    },

    #[error("Unique constraint violated on {entity}.{field}")]
    UniqueViolation {
        entity: &'static str,
        field: &'static str,
    },
}

impl From<DbError> for RootPilotError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => RootPilotError::NotFound {
                entity: entity.into(),
                id,
            },
            err @ DbError::StatusMismatch { .. } => RootPilotError::Conflict {
                reason: err.to_string(),
            },
            DbError::UniqueViolation { entity, .. } => RootPilotError::AlreadyExists {
                entity: entity.into(),
            },
        }
    }
}
