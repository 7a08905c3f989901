use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrsError {
    #[error("{0}")]
    Validation(String),
    #[error("Quality must be an integer between 0 and 3 (word {word_id}, got {quality})")]
    InvalidQuality { word_id: i32, quality: i32 },
    #[error("Word not found: {0}")]
    UnknownWord(i32),
    #[error("Word {word_id} already has a review in progress (quality {quality} rejected)")]
    ConcurrentReview { word_id: i32, quality: i32 },
    #[error("Cannot {action} while the review session is {state}")]
    InvalidSessionAction { action: &'static str, state: &'static str },
    #[error("Database error: {0}")]
    Database(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("Session error: {0}")]
    Session(String),
}

impl SrsError {
    /// The caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SrsError::ConcurrentReview { .. }
                | SrsError::Database(_)
                | SrsError::Pool(_)
                | SrsError::Session(_)
        )
    }
}

pub type SrsResult<T> = Result<T, SrsError>;
