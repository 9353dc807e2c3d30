//! Analysis service. Turns a form submission into validated location analyses.
//!
//! Coordinates between the request builder (prompt + schema), the model port
//! (transport) and payload validation. Every failure is logged with its
//! diagnostic and collapsed into `DomainError::AnalysisFailed`.

use crate::domain::payload::parse_locations;
use crate::domain::prompt::{AnalysisPrompt, TOP_LOCATIONS};
use crate::domain::{AnalysisRequest, DomainError, LocationAnalysis};
use crate::ports::GenerativeModelPort;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Service for AI-powered location analysis.
///
/// Orchestrates the flow:
/// 1. Check the request has the required fields
/// 2. Build prompt and output schema
/// 3. Send to the model (single call, no retry)
/// 4. Validate the payload and coerce coordinates
pub struct AnalysisService {
    model: Arc<dyn GenerativeModelPort>,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn GenerativeModelPort>) -> Self {
        Self { model }
    }

    /// Analyze candidate locations for the request, in model order.
    ///
    /// # Errors
    /// `InvalidRequest` when a required field is missing; `AnalysisFailed` for
    /// any transport, empty or malformed response.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Vec<LocationAnalysis>, DomainError> {
        validate_request(request)?;

        match self.fetch(request).await {
            Ok(locations) => Ok(locations),
            Err(e) if e.is_analysis_failure() => {
                error!(
                    area = %request.area,
                    business_type = %request.business_type,
                    model = %self.model.model_name(),
                    error = %e,
                    "error fetching location analysis"
                );
                Err(DomainError::AnalysisFailed)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch(&self, request: &AnalysisRequest) -> Result<Vec<LocationAnalysis>, DomainError> {
        let prompt = AnalysisPrompt::build(request);

        info!(
            area = %request.area,
            business_type = %request.business_type,
            model = %self.model.model_name(),
            "requesting location analysis"
        );

        let payload = self.model.generate(&prompt).await?;
        let mut locations = parse_locations(&payload)?;

        if locations.len() > TOP_LOCATIONS {
            warn!(
                returned = locations.len(),
                kept = TOP_LOCATIONS,
                "model returned more locations than requested; dropping the rest"
            );
            locations.truncate(TOP_LOCATIONS);
        }

        info!(locations = locations.len(), "location analysis complete");
        Ok(locations)
    }
}

/// Required-field check for the form. Investment must be numeric text.
pub fn validate_request(request: &AnalysisRequest) -> Result<(), DomainError> {
    if request.area.trim().is_empty() {
        return Err(DomainError::InvalidRequest("area is required".into()));
    }
    if request.business_type.trim().is_empty() {
        return Err(DomainError::InvalidRequest(
            "business type is required".into(),
        ));
    }
    let investment = request.investment.trim();
    if investment.is_empty() {
        return Err(DomainError::InvalidRequest("investment is required".into()));
    }
    if !investment.parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(DomainError::InvalidRequest(format!(
            "investment must be a number, got {:?}",
            investment
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::ANALYSIS_FAILED_MESSAGE;
    use crate::domain::payload::tests::location_json;
    use std::sync::Mutex;

    /// Model stub returning a fixed outcome and recording prompts.
    pub(crate) struct ScriptedModel {
        outcome: Result<String, String>,
        pub(crate) prompts: Mutex<Vec<AnalysisPrompt>>,
    }

    impl ScriptedModel {
        pub(crate) fn ok(payload: impl Into<String>) -> Self {
            Self {
                outcome: Ok(payload.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn transport_error(msg: &str) -> Self {
            Self {
                outcome: Err(msg.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl GenerativeModelPort for ScriptedModel {
        async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String, DomainError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.outcome.clone().map_err(DomainError::Transport)
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    pub(crate) fn three_locations() -> String {
        format!(
            "[{}, {}, {}]",
            location_json("HSR Layout", 88, "12.9116", "77.6389"),
            location_json("Koramangala 5th Block", 92, "\"12.9352\"", "\"77.6245\""),
            location_json("BTM Layout", 75, "12.9166", "77.6101"),
        )
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("Koramangala, Bengaluru", "Cloud Kitchen", "5000000")
    }

    fn service(model: ScriptedModel) -> (AnalysisService, Arc<ScriptedModel>) {
        let model = Arc::new(model);
        (AnalysisService::new(model.clone()), model)
    }

    #[tokio::test]
    async fn test_analyze_success_keeps_model_order() {
        let (svc, model) = service(ScriptedModel::ok(three_locations()));
        let locations = svc.analyze(&request()).await.unwrap();

        let scores: Vec<i64> = locations.iter().map(|l| l.overall_score).collect();
        assert_eq!(scores, vec![88, 92, 75]);
        assert_eq!(locations[1].latitude, 12.9352);
        assert_eq!(locations[1].longitude, 77.6245);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].text.contains("Cloud Kitchen"));
    }

    #[tokio::test]
    async fn test_analyze_empty_array() {
        let (svc, _) = service(ScriptedModel::ok("[]"));
        assert!(svc.analyze(&request()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_failures_collapse() {
        for model in [
            ScriptedModel::ok("   "),
            ScriptedModel::ok("{oops"),
            ScriptedModel::ok("[{\"locationName\": \"x\"}]"),
            ScriptedModel::transport_error("401 Unauthorized"),
        ] {
            let (svc, _) = service(model);
            let err = svc.analyze(&request()).await.unwrap_err();
            assert!(matches!(err, DomainError::AnalysisFailed));
            assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_analyze_caps_at_top_locations() {
        let payload = format!(
            "[{}, {}, {}, {}]",
            location_json("a", 50, "1", "1"),
            location_json("b", 60, "1", "1"),
            location_json("c", 70, "1", "1"),
            location_json("d", 99, "1", "1"),
        );
        let (svc, _) = service(ScriptedModel::ok(payload));
        let locations = svc.analyze(&request()).await.unwrap();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[2].location_name, "c");
    }

    #[tokio::test]
    async fn test_invalid_request_skips_model() {
        let (svc, model) = service(ScriptedModel::ok("[]"));
        let err = svc
            .analyze(&AnalysisRequest::new("Pune", "  ", "100"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validate_request_investment() {
        assert!(validate_request(&AnalysisRequest::new("a", "b", "5000000")).is_ok());
        assert!(validate_request(&AnalysisRequest::new("a", "b", "-10.5")).is_ok());
        assert!(validate_request(&AnalysisRequest::new("a", "b", "")).is_err());
        assert!(validate_request(&AnalysisRequest::new("a", "b", "lots")).is_err());
        assert!(validate_request(&AnalysisRequest::new("a", "b", "inf")).is_err());
    }
}
