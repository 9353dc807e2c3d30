//! Results renderer. Derives a terminal view from the controller state.
//!
//! Cards are ranked by score (ties keep response order) and each one owns a
//! mounted map widget. Dropping the view, or a card, releases its map.

use crate::adapters::ui::chart::{DEFAULT_BAR_WIDTH, render_chart, render_year_details};
use crate::adapters::ui::format::format_inr;
use crate::domain::{AnalysisQuery, LocationAnalysis, RiskLevel, rank_locations};
use crate::ports::{MapRenderer, MapWidget};
use crate::usecases::AppState;
use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use tracing::warn;

/// Map area of one card. Holds at most one mounted widget.
pub struct MapPanel {
    widget: Result<Box<dyn MapWidget>, String>,
}

impl MapPanel {
    pub fn mount(maps: &dyn MapRenderer, latitude: f64, longitude: f64) -> Self {
        let widget = maps.mount(latitude, longitude).map_err(|e| {
            warn!(latitude, longitude, error = %e, "map unavailable for card");
            e.to_string()
        });
        Self { widget }
    }

    /// Move the panel to new coordinates. The old widget is released first.
    pub fn recenter(&mut self, maps: &dyn MapRenderer, latitude: f64, longitude: f64) {
        if let Ok(current) = &self.widget {
            if current.center() == (latitude, longitude) {
                return;
            }
        }
        self.widget = Err("recentering".to_string());
        *self = Self::mount(maps, latitude, longitude);
    }

    pub fn is_mounted(&self) -> bool {
        self.widget.is_ok()
    }

    fn render(&self) -> Vec<String> {
        match &self.widget {
            Ok(widget) => widget.render(),
            Err(e) => vec![format!("Map unavailable: {}", e)],
        }
    }
}

/// One ranked location with its map.
pub struct LocationCard {
    pub rank: usize,
    pub location: LocationAnalysis,
    pub map: MapPanel,
}

impl LocationCard {
    pub fn new(rank: usize, location: LocationAnalysis, maps: &dyn MapRenderer) -> Self {
        let map = MapPanel::mount(maps, location.latitude, location.longitude);
        Self {
            rank,
            location,
            map,
        }
    }

    /// Replace the location (e.g. corrected coordinates), remounting the map if needed.
    pub fn update_location(&mut self, location: LocationAnalysis, maps: &dyn MapRenderer) {
        self.map
            .recenter(maps, location.latitude, location.longitude);
        self.location = location;
    }

    pub fn render(&self) -> Vec<String> {
        let loc = &self.location;
        let fin = &loc.financials;
        let mut lines = Vec::new();

        lines.push(format!(
            "{}  {}    {}",
            format!("#{}", self.rank).cyan().bold(),
            loc.location_name.as_str().white().bold(),
            format!("{}/100", loc.overall_score).cyan().bold()
        ));
        lines.push(format!("    📍 {}", loc.address));
        lines.push(String::new());
        lines.push(format!("    {}", loc.summary));
        lines.push(String::new());

        lines.push(section("Demographics & Market"));
        lines.push(format!(
            "    {}  {}",
            stat("Foot Traffic", &loc.market_analysis.foot_traffic),
            stat("Competition", &loc.market_analysis.competitor_density)
        ));
        lines.push(format!(
            "    {}  {}",
            stat("Population", &loc.demographics.population_density),
            stat("Avg. Income", &format_inr(loc.demographics.avg_income as f64))
        ));
        lines.push(format!(
            "    {}",
            stat("Dominant Age", &loc.demographics.dominant_age_group)
        ));

        lines.push(section("Risk Assessment"));
        lines.push(format!(
            "    {}  {}",
            risk_badge(&loc.risk.level),
            loc.risk.factors
        ));

        lines.push(section("Financial Projections"));
        lines.push(format!(
            "    {}  {}",
            stat("5-Year ROI", &format!("{:.1}%", fin.roi)),
            stat("Breakeven", &format!("Year {}", fin.break_even_year))
        ));
        lines.extend(
            render_chart(fin, DEFAULT_BAR_WIDTH)
                .into_iter()
                .map(|l| format!("    {}", l)),
        );

        lines.push(section("Geospatial View"));
        lines.extend(self.map.render().into_iter().map(|l| format!("    {}", l)));
        lines
    }

    /// The year-by-year breakdown with derived profit.
    pub fn render_details(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "#{} {} - yearly projection",
            self.rank, self.location.location_name
        )];
        lines.extend(render_year_details(&self.location.financials));
        lines
    }
}

fn section(title: &str) -> String {
    format!("  {}", title.dark_cyan().bold())
}

fn stat(label: &str, value: &str) -> String {
    format!("{}: {}", label.dark_grey(), value.white().bold())
}

/// Risk label coloured by level.
pub fn risk_badge(level: &RiskLevel) -> String {
    let text = format!(" {} Risk ", level);
    match level {
        RiskLevel::Low => text.black().on_green().to_string(),
        RiskLevel::Medium => text.black().on_yellow().to_string(),
        RiskLevel::High => text.white().on_red().to_string(),
        RiskLevel::Other(_) => text.white().on_dark_grey().to_string(),
    }
}

/// What the results area shows.
pub enum DashboardView {
    Loading {
        query: AnalysisQuery,
    },
    Failed {
        message: String,
    },
    /// No analysis attempted yet.
    Empty,
    /// The model returned an empty list.
    NoResults,
    Results {
        query: AnalysisQuery,
        generated_at: DateTime<Utc>,
        cards: Vec<LocationCard>,
    },
}

impl DashboardView {
    pub fn from_state(state: &AppState, maps: &dyn MapRenderer) -> Self {
        match state {
            AppState::Idle => Self::Empty,
            AppState::Loading { query } => Self::Loading {
                query: query.clone(),
            },
            AppState::Failed { message, .. } => Self::Failed {
                message: message.clone(),
            },
            AppState::Success { results, .. } if results.is_empty() => Self::NoResults,
            AppState::Success {
                query,
                results,
                generated_at,
            } => Self::Results {
                query: query.clone(),
                generated_at: *generated_at,
                cards: rank_locations(results)
                    .into_iter()
                    .map(|r| LocationCard::new(r.rank, r.location.clone(), maps))
                    .collect(),
            },
        }
    }

    pub fn cards(&self) -> &[LocationCard] {
        match self {
            Self::Results { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        match self {
            Self::Loading { query } => {
                lines.push(format!(
                    "⏳ Analyzing locations for a {} in {}...",
                    query.business_type, query.area
                ));
            }
            Self::Failed { message } => {
                lines.push("Analysis Failed".red().bold().to_string());
                lines.push(message.as_str().red().to_string());
            }
            Self::Empty => {
                lines.push("Ready to Discover Opportunities?".bold().to_string());
                lines.push("Your location analysis results will appear here.".to_string());
            }
            Self::NoResults => {
                lines.push("No Suitable Locations Found".bold().to_string());
                lines.push("Try adjusting your search criteria for better results.".to_string());
            }
            Self::Results {
                query,
                generated_at,
                cards,
            } => {
                lines.push(format!(
                    "Top Locations for a {} in {}",
                    query.business_type.as_str().cyan().bold(),
                    query.area.as_str().cyan().bold()
                ));
                lines.push(
                    format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC"))
                        .dark_grey()
                        .to_string(),
                );
                for card in cards {
                    lines.push(String::new());
                    lines.push("─".repeat(72));
                    lines.extend(card.render());
                }
            }
        }
        lines.join("\n")
    }
}
