use thiserror::Error;

/// Raised only when the input document as a whole is unusable. Malformed
/// entries below the top level degrade to warnings instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
