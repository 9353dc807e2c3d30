//! Infrastructure adapters. Implement outbound ports.
//!
//! Generative model clients and the terminal UI. Map errors to DomainError.

pub mod ai;
pub mod ui;
