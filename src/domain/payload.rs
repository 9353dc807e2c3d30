//! Structural validation of the model's JSON payload.
//!
//! The payload is untrusted. It is checked for required fields, field types and
//! projection lengths before any `LocationAnalysis` is built. Unknown fields
//! are ignored. Latitude/longitude may arrive as numeric strings, and integer
//! fields accept integral floats (`80.0`).

use crate::domain::entities::whole_number;
use crate::domain::{
    Demographics, DomainError, Financials, LocationAnalysis, MarketAnalysis, PROJECTION_YEARS,
    Risk,
};
use serde::Deserialize;

/// Strip a Markdown code fence or prose around a JSON array.
///
/// Schema-constrained output is usually bare JSON, but fenced output is
/// still seen from some models.
pub fn sanitize_json(raw_text: &str) -> &str {
    let trimmed = raw_text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = rest.strip_prefix("json").unwrap_or(rest);
        let body = match body.rfind("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim();
    }

    // An object root is left whole so it is reported as such.
    if trimmed.starts_with('{') {
        return trimmed;
    }
    match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse the model's text payload into location analyses, preserving order.
///
/// # Errors
/// `EmptyResponse` when the payload is blank, `MalformedResponse` on invalid
/// JSON, a non-array root or a structural mismatch in any element.
pub fn parse_locations(raw_text: &str) -> Result<Vec<LocationAnalysis>, DomainError> {
    let json = sanitize_json(raw_text);
    if json.is_empty() {
        return Err(DomainError::EmptyResponse);
    }

    let root: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let items = match root {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(DomainError::MalformedResponse(format!(
                "expected a JSON array of locations, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let wire: WireLocation = serde_json::from_value(item).map_err(|e| {
                DomainError::MalformedResponse(format!("location {}: {}", i + 1, e))
            })?;
            wire.into_location().map_err(|msg| {
                DomainError::MalformedResponse(format!("location {}: {}", i + 1, msg))
            })
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Wire shape of one element. Nested objects reuse the domain types directly.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    location_name: String,
    address: String,
    latitude: WireCoordinate,
    longitude: WireCoordinate,
    #[serde(deserialize_with = "whole_number")]
    overall_score: i64,
    summary: String,
    demographics: Demographics,
    market_analysis: MarketAnalysis,
    financials: WireFinancials,
    risk: Risk,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireCoordinate {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFinancials {
    projected_revenue: Vec<f64>,
    projected_costs: Vec<f64>,
    #[serde(deserialize_with = "whole_number")]
    break_even_year: i64,
    roi: f64,
}

impl WireCoordinate {
    fn coerce(self, field: &str) -> Result<f64, String> {
        let value = match self {
            Self::Number(n) => n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{} is not numeric: {:?}", field, s))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{} is not a finite number", field))
        }
    }
}

fn projection(values: Vec<f64>, field: &str) -> Result<[f64; PROJECTION_YEARS], String> {
    let len = values.len();
    <[f64; PROJECTION_YEARS]>::try_from(values).map_err(|_| {
        format!(
            "financials.{} has {} values, expected {}",
            field, len, PROJECTION_YEARS
        )
    })
}

impl WireLocation {
    fn into_location(self) -> Result<LocationAnalysis, String> {
        Ok(LocationAnalysis {
            location_name: self.location_name,
            address: self.address,
            latitude: self.latitude.coerce("latitude")?,
            longitude: self.longitude.coerce("longitude")?,
            overall_score: self.overall_score,
            summary: self.summary,
            demographics: self.demographics,
            market_analysis: self.market_analysis,
            financials: Financials {
                projected_revenue: projection(
                    self.financials.projected_revenue,
                    "projectedRevenue",
                )?,
                projected_costs: projection(self.financials.projected_costs, "projectedCosts")?,
                break_even_year: self.financials.break_even_year,
                roi: self.financials.roi,
            },
            risk: self.risk,
        })
    }
}
