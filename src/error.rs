//! Diary service errors

use thiserror::Error;

use crate::db::DbError;
use crate::models::{EntryId, ValidationError};

#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    #[error("Food entry not found with id: {0}")]
    EntryNotFound(EntryId),
}

pub type DiaryResult<T> = Result<T, DiaryError>;
