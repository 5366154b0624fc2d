//! Error types for epoch driving

use thiserror::Error;

/// Error type for epoch driving
#[derive(Error, Debug)]
pub enum Error {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] graph_batch_core::error::Error),

    /// Error raised by the model collaborator
    #[error("Model error: {0}")]
    Model(String),

    /// Report serialization error
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for epoch driving
pub type Result<T> = std::result::Result<T, Error>;
