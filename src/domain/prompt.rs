//! Analysis request builder: natural-language prompt plus output schema.
//!
//! Pure construction. The schema uses the uppercase type names of the
//! Gemini `responseSchema` dialect.

use crate::domain::{AnalysisRequest, PROJECTION_YEARS};
use serde::Serialize;
use std::collections::BTreeMap;

pub const JSON_MIME_TYPE: &str = "application/json";

/// How many locations the model is asked to return.
pub const TOP_LOCATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
}

/// One node of the structured-output schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Declaration order of `properties` (the map itself is sorted).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

impl Schema {
    fn leaf(schema_type: SchemaType, description: &str) -> Self {
        Self {
            schema_type,
            description: Some(description.to_string()),
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn string(description: &str) -> Self {
        Self::leaf(SchemaType::String, description)
    }

    pub fn number(description: &str) -> Self {
        Self::leaf(SchemaType::Number, description)
    }

    pub fn integer(description: &str) -> Self {
        Self::leaf(SchemaType::Integer, description)
    }

    pub fn array(items: Schema, description: Option<&str>) -> Self {
        Self {
            items: Some(Box::new(items)),
            description: description.map(str::to_string),
            ..Self::leaf(SchemaType::Array, "")
        }
    }

    /// Array of exactly `len` items.
    pub fn fixed_array(items: Schema, len: u32, description: &str) -> Self {
        Self {
            min_items: Some(len),
            max_items: Some(len),
            ..Self::array(items, Some(description))
        }
    }

    /// Object whose fields are all required, in the given order.
    pub fn object(fields: Vec<(&str, Schema)>) -> Self {
        let property_ordering: Vec<String> = fields.iter().map(|(k, _)| k.to_string()).collect();
        Self {
            schema_type: SchemaType::Object,
            description: None,
            required: property_ordering.clone(),
            property_ordering,
            properties: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            items: None,
            min_items: None,
            max_items: None,
        }
    }
}

/// Prompt text, output schema and mime type for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisPrompt {
    /// Trimmed area the prompt is about.
    pub area: String,
    pub text: String,
    pub schema: Schema,
    pub mime_type: &'static str,
}

impl AnalysisPrompt {
    pub fn build(request: &AnalysisRequest) -> Self {
        Self {
            area: request.area.trim().to_string(),
            text: prompt_text(request),
            schema: response_schema(),
            mime_type: JSON_MIME_TYPE,
        }
    }
}

fn prompt_text(request: &AnalysisRequest) -> String {
    format!(
        r#"Analyze the area of "{area}" in India and find the top {top} most profitable and suitable locations to open a new "{business}" with an initial investment of INR {investment}.

For each location provide:
1. Coordinates: precise latitude and longitude of the suggested site.
2. Demographics: population density, average annual household income in INR, dominant age group.
3. Market analysis: estimated foot traffic and density of competing businesses.
4. Financial projection: revenue and operating costs in INR for each of the first {years} years, the break-even year and the {years}-year ROI.
5. Risk assessment: the main risk factors and an overall risk level (Low, Medium or High).
6. Overall score: a score out of 100 for the site's potential.

Return the top {top} locations. Be realistic and data-driven. Express all financial figures in Indian Rupees (INR)."#,
        area = request.area.trim(),
        business = request.business_type.trim(),
        investment = request.investment.trim(),
        top = TOP_LOCATIONS,
        years = PROJECTION_YEARS,
    )
}

/// Schema of the whole response: an array of location objects.
pub fn response_schema() -> Schema {
    Schema::array(location_schema(), None)
}

fn location_schema() -> Schema {
    let years = PROJECTION_YEARS as u32;
    Schema::object(vec![
        (
            "locationName",
            Schema::string("Name of the neighbourhood or area, e.g. 'Koramangala, Bengaluru'."),
        ),
        (
            "address",
            Schema::string("A plausible street address for a commercial site in the area."),
        ),
        ("latitude", Schema::number("Latitude of the location.")),
        ("longitude", Schema::number("Longitude of the location.")),
        (
            "overallScore",
            Schema::integer("Score from 1 to 100 for the site's profitability and suitability."),
        ),
        (
            "summary",
            Schema::string("2-3 sentences explaining why this location is recommended."),
        ),
        (
            "demographics",
            Schema::object(vec![
                ("populationDensity", Schema::string("'High', 'Medium' or 'Low'.")),
                (
                    "avgIncome",
                    Schema::integer("Average annual household income in INR."),
                ),
                ("dominantAgeGroup", Schema::string("Age range, e.g. '25-35'.")),
            ]),
        ),
        (
            "marketAnalysis",
            Schema::object(vec![
                (
                    "footTraffic",
                    Schema::string("Estimated foot traffic: 'High', 'Medium' or 'Low'."),
                ),
                (
                    "competitorDensity",
                    Schema::string("Density of similar businesses: 'High', 'Medium' or 'Low'."),
                ),
            ]),
        ),
        (
            "financials",
            Schema::object(vec![
                (
                    "projectedRevenue",
                    Schema::fixed_array(
                        Schema::number("Annual revenue in INR."),
                        years,
                        "Projected annual revenue in INR for each of the first 5 years.",
                    ),
                ),
                (
                    "projectedCosts",
                    Schema::fixed_array(
                        Schema::number("Annual operating costs in INR."),
                        years,
                        "Projected annual operating costs in INR for each of the first 5 years.",
                    ),
                ),
                (
                    "breakEvenYear",
                    Schema::integer("Year (1-5) in which the business becomes profitable."),
                ),
                (
                    "roi",
                    Schema::number("5-year return on investment as a percentage, e.g. 150.5."),
                ),
            ]),
        ),
        (
            "risk",
            Schema::object(vec![
                ("level", Schema::string("'Low', 'Medium' or 'High'.")),
                (
                    "factors",
                    Schema::string("Brief description of the primary risk factors."),
                ),
            ]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("Koramangala, Bengaluru", "Cloud Kitchen", "5000000")
    }

    #[test]
    fn test_prompt_interpolates_inputs() {
        let prompt = AnalysisPrompt::build(&request());
        assert!(prompt.text.contains("\"Koramangala, Bengaluru\""));
        assert!(prompt.text.contains("\"Cloud Kitchen\""));
        assert!(prompt.text.contains("INR 5000000"));
        assert!(prompt.text.contains("top 3"));
        assert_eq!(prompt.mime_type, "application/json");
        assert_eq!(prompt.area, "Koramangala, Bengaluru");
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = serde_json::to_value(response_schema()).unwrap();
        assert_eq!(schema["type"], "ARRAY");
        let item = &schema["items"];
        assert_eq!(item["type"], "OBJECT");
        let required: Vec<&str> = item["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            vec![
                "locationName",
                "address",
                "latitude",
                "longitude",
                "overallScore",
                "summary",
                "demographics",
                "marketAnalysis",
                "financials",
                "risk"
            ]
        );
        assert_eq!(
            item["properties"]["risk"]["required"],
            serde_json::json!(["level", "factors"])
        );
    }

    #[test]
    fn test_schema_fixes_projection_length() {
        let schema = serde_json::to_value(response_schema()).unwrap();
        let revenue = &schema["items"]["properties"]["financials"]["properties"]["projectedRevenue"];
        assert_eq!(revenue["type"], "ARRAY");
        assert_eq!(revenue["minItems"], 5);
        assert_eq!(revenue["maxItems"], 5);
        assert_eq!(revenue["items"]["type"], "NUMBER");
        assert!(schema.get("minItems").is_none());
    }
}
