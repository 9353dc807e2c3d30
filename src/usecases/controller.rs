//! Application state controller. Owns the Idle/Loading/Success/Failed machine.
//!
//! Every submission gets a monotonically increasing `RequestToken`. Only the
//! completion carrying the latest token is applied, so a slow earlier call
//! can never overwrite the result of a later one.

use crate::domain::{AnalysisQuery, AnalysisRequest, DomainError, LocationAnalysis};
use crate::usecases::AnalysisService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// No submission yet.
    Idle,
    Loading {
        query: AnalysisQuery,
    },
    Success {
        query: AnalysisQuery,
        /// In model order; ranking happens at render time.
        results: Arc<[LocationAnalysis]>,
        generated_at: DateTime<Utc>,
    },
    Failed {
        query: AnalysisQuery,
        message: String,
    },
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn query(&self) -> Option<&AnalysisQuery> {
        match self {
            Self::Idle => None,
            Self::Loading { query }
            | Self::Success { query, .. }
            | Self::Failed { query, .. } => Some(query),
        }
    }
}

struct ControllerState {
    state: AppState,
    latest: u64,
}

pub struct AnalysisController {
    service: Arc<AnalysisService>,
    inner: RwLock<ControllerState>,
}

impl AnalysisController {
    pub fn new(service: Arc<AnalysisService>) -> Self {
        Self {
            service,
            inner: RwLock::new(ControllerState {
                state: AppState::Idle,
                latest: 0,
            }),
        }
    }

    /// Move to `Loading` for `request`, dropping prior results or error.
    pub async fn begin(&self, request: &AnalysisRequest) -> RequestToken {
        let mut inner = self.inner.write().await;
        inner.latest += 1;
        inner.state = AppState::Loading {
            query: request.query(),
        };
        RequestToken(inner.latest)
    }

    /// Apply the outcome of the submission identified by `token`.
    ///
    /// Returns false (and leaves the state untouched) when a newer submission
    /// has been issued since.
    pub async fn complete(
        &self,
        token: RequestToken,
        outcome: Result<Vec<LocationAnalysis>, DomainError>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if token.0 != inner.latest {
            warn!(
                token = token.0,
                latest = inner.latest,
                "discarding stale analysis response"
            );
            return false;
        }

        let query = match &inner.state {
            AppState::Loading { query } => query.clone(),
            other => {
                // Same token completed twice; the first one already settled it.
                warn!(token = token.0, state = ?other, "analysis already completed");
                return false;
            }
        };

        inner.state = match outcome {
            Ok(results) => {
                info!(token = token.0, locations = results.len(), "analysis stored");
                AppState::Success {
                    query,
                    results: results.into(),
                    generated_at: Utc::now(),
                }
            }
            Err(e) => AppState::Failed {
                query,
                message: e.to_string(),
            },
        };
        true
    }

    /// begin -> analyze -> complete. Returns whether the outcome was applied.
    pub async fn submit(&self, request: &AnalysisRequest) -> bool {
        let token = self.begin(request).await;
        let outcome = self.service.analyze(request).await;
        self.complete(token, outcome).await
    }

    pub async fn snapshot(&self) -> AppState {
        self.inner.read().await.state.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.state.is_loading()
    }
}
