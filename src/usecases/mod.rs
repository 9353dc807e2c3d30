//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod controller;
pub mod suggestions;

pub use analysis_service::AnalysisService;
pub use controller::{AnalysisController, AppState, RequestToken};
