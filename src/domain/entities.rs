//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here. The model payload is validated into these
//! in `domain::payload`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of yearly values in every financial projection.
pub const PROJECTION_YEARS: usize = 5;

/// Integer field that also accepts an integral float such as `80.0`.
pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Whole {
        Int(i64),
        Float(f64),
    }

    match Whole::deserialize(deserializer)? {
        Whole::Int(n) => Ok(n),
        Whole::Float(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Ok(f as i64),
        Whole::Float(f) => Err(serde::de::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
    }
}

/// What the user asked for. All fields are user-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub area: String,
    pub business_type: String,
    /// Numeric text in INR. Not range-checked.
    pub investment: String,
}

impl AnalysisRequest {
    pub fn new(
        area: impl Into<String>,
        business_type: impl Into<String>,
        investment: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            business_type: business_type.into(),
            investment: investment.into(),
        }
    }

    /// The (area, business type) pair shown above the results.
    pub fn query(&self) -> AnalysisQuery {
        AnalysisQuery {
            area: self.area.trim().to_string(),
            business_type: self.business_type.trim().to_string(),
        }
    }
}

/// Recorded at submission time for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisQuery {
    pub area: String,
    pub business_type: String,
}

/// One recommended site, as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    pub location_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub overall_score: i64,
    pub summary: String,
    pub demographics: Demographics,
    pub market_analysis: MarketAnalysis,
    pub financials: Financials,
    pub risk: Risk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub population_density: String,
    /// Average annual household income in INR.
    #[serde(deserialize_with = "whole_number")]
    pub avg_income: i64,
    pub dominant_age_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub foot_traffic: String,
    pub competitor_density: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub projected_revenue: [f64; PROJECTION_YEARS],
    pub projected_costs: [f64; PROJECTION_YEARS],
    #[serde(deserialize_with = "whole_number")]
    pub break_even_year: i64,
    /// 5-year return on investment, as a percentage.
    pub roi: f64,
}

/// Revenue, costs and derived profit for one projection year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearProjection {
    /// 1-based.
    pub year: usize,
    pub revenue: f64,
    pub costs: f64,
}

impl YearProjection {
    pub fn profit(&self) -> f64 {
        self.revenue - self.costs
    }
}

impl Financials {
    /// Year-by-year rows, year 1 first.
    pub fn years(&self) -> impl Iterator<Item = YearProjection> + '_ {
        self.projected_revenue
            .iter()
            .zip(self.projected_costs.iter())
            .enumerate()
            .map(|(i, (&revenue, &costs))| YearProjection {
                year: i + 1,
                revenue,
                costs,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub level: RiskLevel,
    pub factors: String,
}

/// Risk classification. Unknown labels are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::Medium => f.write_str("Medium"),
            Self::High => f.write_str("High"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_case_insensitive() {
        assert_eq!(RiskLevel::from("HIGH".to_string()), RiskLevel::High);
        assert_eq!(RiskLevel::from(" low ".to_string()), RiskLevel::Low);
        assert_eq!(
            RiskLevel::from("Severe".to_string()),
            RiskLevel::Other("Severe".to_string())
        );
    }

    #[test]
    fn test_years_derive_profit() {
        let f = Financials {
            projected_revenue: [100.0, 200.0, 300.0, 400.0, 500.0],
            projected_costs: [150.0, 150.0, 150.0, 150.0, 150.0],
            break_even_year: 2,
            roi: 12.5,
        };
        let years: Vec<_> = f.years().collect();
        assert_eq!(years.len(), PROJECTION_YEARS);
        assert_eq!(years[0].year, 1);
        assert_eq!(years[0].profit(), -50.0);
        assert_eq!(years[4].profit(), 350.0);
    }

    #[test]
    fn test_query_trims() {
        let req = AnalysisRequest::new("  Indiranagar ", "Cafe ", "100");
        let q = req.query();
        assert_eq!(q.area, "Indiranagar");
        assert_eq!(q.business_type, "Cafe");
    }
}
