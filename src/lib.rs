//! site-select: AI-assisted business location analysis for Indian cities, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
