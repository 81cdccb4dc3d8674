use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by a [`TileStore`](crate::services::tiles::TileStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        StorageError::Database(error.to_string())
    }
}

impl Serialize for StorageError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

/// Errors raised by the matching engine.
///
/// Missing `group_id` is a contract violation and aborts the operation.
/// Data-quality problems are reported through `ValidationResult` instead.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0}")]
    MissingGroupId(String),
    #[error("Cannot compare tiles without group_id")]
    CompareWithoutGroupId,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MatchError {
    pub fn is_missing_group_id(&self) -> bool {
        matches!(self, MatchError::MissingGroupId(_))
    }
}

impl Serialize for MatchError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type MatchOutcome<T> = Result<T, MatchError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
