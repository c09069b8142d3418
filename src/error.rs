//! Error types for the sentiment cards library

use crate::sentiment::TrainingError;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Artifacts missing, corrupt or inconsistent; nothing can be served
    #[error("Startup failed: {0}")]
    Startup(String),

    /// Input rejected before it reaches the model
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Model training failed
    #[error("Training failed: {0}")]
    Training(#[from] TrainingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors that must stop the process instead of being shown to the user
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Startup(_) | Error::Config(_))
    }
}
