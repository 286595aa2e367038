use cache::CacheAsideError;
use thiserror::Error;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Task title must not be empty")]
    Empty,

    #[error("Task title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid task title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Task with ID {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<CacheAsideError<TaskError>> for TaskError {
    fn from(err: CacheAsideError<TaskError>) -> Self {
        match err {
            CacheAsideError::NotFound(id) => TaskError::NotFound(id),
            CacheAsideError::Store(e) => e,
        }
    }
}
