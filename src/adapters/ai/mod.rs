//! AI adapter module. Implements GenerativeModelPort.
//!
//! Provides the Gemini adapter and a mock adapter for running without a key.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockModelAdapter;
