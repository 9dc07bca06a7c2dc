use thiserror::Error;

/// Main error type for eventgraph
#[derive(Error, Debug)]
pub enum EventGraphError {
    /// Caller passed something the transformation cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Extraction result is missing required fields or has the wrong shape
    #[error("Malformed extraction result: {0}")]
    MalformedResult(String),

    /// Two nodes share an id but disagree on their attributes
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering errors
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenient Result type using EventGraphError
pub type Result<T> = std::result::Result<T, EventGraphError>;
