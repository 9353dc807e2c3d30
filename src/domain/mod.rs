//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod payload;
pub mod prompt;
pub mod ranking;

pub use entities::{
    AnalysisQuery, AnalysisRequest, Demographics, Financials, LocationAnalysis, MarketAnalysis,
    PROJECTION_YEARS, Risk, RiskLevel, YearProjection,
};
pub use errors::{ANALYSIS_FAILED_MESSAGE, DomainError};
pub use ranking::{RankedLocation, rank_locations};
