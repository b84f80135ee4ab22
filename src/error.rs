use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is empty or a step rule is broken. Names the first
    /// offending field in declaration order.
    #[error("{0}")]
    Validation(String),

    /// Seat selection would exceed the passenger cap.
    #[error("Maximum {cap} seat(s) allowed")]
    SeatCapExceeded { cap: usize },

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
