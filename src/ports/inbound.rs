//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive front-end driving the analysis use case.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the form -> analysis -> dashboard loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
