//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;
use crate::domain::prompt::AnalysisPrompt;

/// Generative text model with schema-constrained output.
#[async_trait::async_trait]
pub trait GenerativeModelPort: Send + Sync {
    /// Send one prompt and return the raw textual payload.
    ///
    /// No retries. A missing text part is returned as an empty string so the
    /// caller can classify it; transport and API failures are `DomainError::Transport`.
    async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String, DomainError>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

/// A mounted single-marker map. Dropping it releases the underlying resources.
pub trait MapWidget: Send + Sync {
    /// Coordinates the widget is centred on.
    fn center(&self) -> (f64, f64);

    /// Terminal lines for the map panel, attribution included.
    fn render(&self) -> Vec<String>;
}

/// Mapping collaborator. Mounts one widget per card.
pub trait MapRenderer: Send + Sync {
    /// Acquire a widget centred on the coordinates with a single marker.
    ///
    /// On error nothing stays acquired.
    fn mount(&self, latitude: f64, longitude: f64) -> Result<Box<dyn MapWidget>, DomainError>;
}
