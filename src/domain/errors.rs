//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// The only analysis failure text the user ever sees.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to get analysis from AI. Please check your inputs or try again later.";

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Network/API-level failure: auth, rate limit, connectivity, bad status.
    #[error("Model transport error: {0}")]
    Transport(String),

    /// User-facing collapse of `EmptyResponse`, `MalformedResponse` and `Transport`.
    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    AnalysisFailed,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Map rendering failed: {0}")]
    Map(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// True for the failures that collapse into `AnalysisFailed`.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyResponse | Self::MalformedResponse(_) | Self::Transport(_)
        )
    }
}
