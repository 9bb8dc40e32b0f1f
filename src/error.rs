//! Error types for the note and group stores.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The kind of entity an id was looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Note,
    Group,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => f.write_str("note"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// Main error type for store operations.
///
/// A missing entity on `read`/`update` is always [`StoreError::NotFound`]. `delete` never
/// returns it; a missing entity there is reported as `Ok(false)`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No {entity} with id {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Validation error in {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn note_not_found(id: Uuid) -> Self {
        StoreError::NotFound {
            entity: EntityKind::Note,
            id,
        }
    }

    pub fn group_not_found(id: Uuid) -> Self {
        StoreError::NotFound {
            entity: EntityKind::Group,
            id,
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            message: message.into(),
        }
    }

    /// The id that could not be resolved, if this is a not-found error.
    pub fn missing_id(&self) -> Option<Uuid> {
        match self {
            StoreError::NotFound { id, .. } => Some(*id),
            _ => None,
        }
    }
}
