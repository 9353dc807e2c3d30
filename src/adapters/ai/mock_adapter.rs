//! Mock model adapter for running without an API key.
//!
//! Returns a canned three-location payload for the requested area after a
//! simulated delay. The payload goes through the same validation as real
//! model output.

use crate::domain::DomainError;
use crate::domain::prompt::AnalysisPrompt;
use crate::ports::GenerativeModelPort;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// Mock model for development and demos.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockModelAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockModelAdapter {
    /// Create a new mock adapter with default delay (800ms).
    pub fn new() -> Self {
        Self { delay_ms: 800 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    /// Three canned sites around the requested area.
    fn canned_payload(area: &str) -> String {
        let (base_lat, base_lon) = city_centre(area);
        let site = |label: &str,
                    street: &str,
                    offset: (f64, f64),
                    score: i64,
                    revenue: [f64; 5],
                    costs: [f64; 5],
                    break_even: i64,
                    roi: f64,
                    risk: &str| {
            json!({
                "locationName": format!("{}, {}", label, area),
                "address": format!("{}, {}", street, area),
                // Strings on purpose: exercises coordinate coercion.
                "latitude": format!("{:.4}", base_lat + offset.0),
                "longitude": format!("{:.4}", base_lon + offset.1),
                "overallScore": score,
                "summary": format!(
                    "[MOCK] {} in {} combines dense residential catchment with strong delivery demand.",
                    label, area
                ),
                "demographics": {
                    "populationDensity": "High",
                    "avgIncome": 1_450_000,
                    "dominantAgeGroup": "25-35"
                },
                "marketAnalysis": {
                    "footTraffic": "High",
                    "competitorDensity": "Medium"
                },
                "financials": {
                    "projectedRevenue": revenue,
                    "projectedCosts": costs,
                    "breakEvenYear": break_even,
                    "roi": roi
                },
                "risk": {
                    "level": risk,
                    "factors": "[MOCK] Commercial rents rising and new competitors nearby."
                }
            })
        };

        json!([
            site(
                "Station Road Corner",
                "Plot 14, Station Road",
                (-0.0600, 0.0443),
                88,
                [3_600_000.0, 4_800_000.0, 5_900_000.0, 6_700_000.0, 7_400_000.0],
                [4_100_000.0, 4_300_000.0, 4_600_000.0, 4_900_000.0, 5_100_000.0],
                2,
                131.0,
                "Medium",
            ),
            site(
                "Central Market Hub",
                "3 Market Street",
                (-0.0364, 0.0299),
                92,
                [4_200_000.0, 5_500_000.0, 6_600_000.0, 7_500_000.0, 8_300_000.0],
                [4_400_000.0, 4_700_000.0, 5_000_000.0, 5_300_000.0, 5_600_000.0],
                2,
                164.5,
                "Low",
            ),
            site(
                "Outer Ring Road Strip",
                "Shop 7, Outer Ring Road",
                (-0.0550, 0.0155),
                75,
                [2_900_000.0, 3_700_000.0, 4_300_000.0, 4_800_000.0, 5_200_000.0],
                [3_500_000.0, 3_600_000.0, 3_800_000.0, 4_000_000.0, 4_100_000.0],
                3,
                72.3,
                "High",
            ),
        ])
        .to_string()
    }
}

/// Approximate centres of the cities in the suggestion list.
const CITY_CENTRES: &[(&str, f64, f64)] = &[
    ("mumbai", 19.0760, 72.8777),
    ("pune", 18.5204, 73.8567),
    ("delhi", 28.6139, 77.2090),
    ("gurugram", 28.4595, 77.0266),
    ("noida", 28.5355, 77.3910),
    ("bengaluru", 12.9716, 77.5946),
    ("hyderabad", 17.3850, 78.4867),
    ("chennai", 13.0827, 80.2707),
    ("kolkata", 22.5726, 88.3639),
    ("ahmedabad", 23.0225, 72.5714),
    ("jaipur", 26.9124, 75.7873),
    ("lucknow", 26.8467, 80.9462),
    ("chandigarh", 30.7333, 76.7794),
    ("kochi", 9.9312, 76.2673),
    ("indore", 22.7196, 75.8577),
    ("mysuru", 12.2958, 76.6394),
    ("goa", 15.4909, 73.8278),
];

/// Centre of the first known city named in `area`; Bengaluru otherwise.
fn city_centre(area: &str) -> (f64, f64) {
    let area = area.to_lowercase();
    CITY_CENTRES
        .iter()
        .find(|(city, _, _)| area.contains(city))
        .map(|&(_, lat, lon)| (lat, lon))
        .unwrap_or((12.9716, 77.5946))
}

impl Default for MockModelAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerativeModelPort for MockModelAdapter {
    async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String, DomainError> {
        info!(
            area = %prompt.area,
            prompt_len = prompt.text.len(),
            "[MOCK] Simulating location analysis"
        );

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(Self::canned_payload(&prompt.area))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
