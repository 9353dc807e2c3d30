//! Implements InputPort. Inquire-based form, spinner and dashboard loop.

use crate::adapters::ui::dashboard::DashboardView;
use crate::adapters::ui::progress::loading_spinner;
use crate::domain::{AnalysisRequest, DomainError};
use crate::ports::{InputPort, MapRenderer};
use crate::usecases::AnalysisController;
use crate::usecases::suggestions::{self, AREAS, BUSINESS_TYPES};
use async_trait::async_trait;
use chrono::Datelike;
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::{Validation, ValueRequiredValidator};
use inquire::{CustomUserError, InquireError, Select, Text};
use std::sync::Arc;
use tracing::info;

const DEFAULT_AREA: &str = "Bengaluru, Karnataka";
const DEFAULT_BUSINESS_TYPE: &str = "Cloud Kitchen";
const DEFAULT_INVESTMENT: &str = "5000000";

const ACTION_NEW: &str = "New analysis";
const ACTION_QUIT: &str = "Quit";

/// Applies the teal prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("◆").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightGreen))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

/// Substring autocompletion over one of the static suggestion lists.
#[derive(Clone)]
struct SuggestionCompleter {
    entries: &'static [&'static str],
}

impl Autocomplete for SuggestionCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(suggestions::filter(self.entries, input))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

/// Prompt outcome: a value, or the user backing out (Esc / Ctrl-C).
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn numeric_investment(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().parse::<f64>().is_ok_and(f64::is_finite) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Enter the investment as a number".into()))
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    controller: Arc<AnalysisController>,
    maps: Arc<dyn MapRenderer>,
}

impl TuiInputPort {
    pub fn new(controller: Arc<AnalysisController>, maps: Arc<dyn MapRenderer>) -> Self {
        Self { controller, maps }
    }

    /// Ask for area, business type and investment. `None` when the user backs out.
    fn prompt_form(&self, last: &AnalysisRequest) -> Result<Option<AnalysisRequest>, DomainError> {
        let Some(area) = prompt_result(
            Text::new("City / Area (India):")
                .with_default(&last.area)
                .with_placeholder("e.g., South Mumbai")
                .with_autocomplete(SuggestionCompleter { entries: AREAS })
                .with_validator(ValueRequiredValidator::default())
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let Some(business_type) = prompt_result(
            Text::new("Business Type:")
                .with_default(&last.business_type)
                .with_placeholder("e.g., Boutique Cafe")
                .with_autocomplete(SuggestionCompleter {
                    entries: BUSINESS_TYPES,
                })
                .with_validator(ValueRequiredValidator::default())
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let Some(investment) = prompt_result(
            Text::new("Initial Investment (INR):")
                .with_default(&last.investment)
                .with_placeholder("e.g., 5000000")
                .with_validator(ValueRequiredValidator::default())
                .with_validator(numeric_investment)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(AnalysisRequest::new(
            area.trim(),
            business_type.trim(),
            investment.trim(),
        )))
    }

    /// Show per-card details until the user picks a new analysis or quits.
    /// Returns false on quit.
    fn browse(&self, view: &DashboardView) -> Result<bool, DomainError> {
        let cards = view.cards();
        loop {
            let mut options: Vec<String> = cards
                .iter()
                .map(|c| format!("Yearly projection for #{} {}", c.rank, c.location.location_name))
                .collect();
            options.push(ACTION_NEW.to_string());
            options.push(ACTION_QUIT.to_string());

            let Some(choice) = prompt_result(Select::new("Next:", options).raw_prompt())? else {
                return Ok(false);
            };

            match cards.get(choice.index) {
                Some(card) => {
                    println!();
                    for line in card.render_details() {
                        println!("  {}", line);
                    }
                    println!();
                }
                None if choice.value == ACTION_NEW => return Ok(true),
                None => return Ok(false),
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut last =
            AnalysisRequest::new(DEFAULT_AREA, DEFAULT_BUSINESS_TYPE, DEFAULT_INVESTMENT);

        let idle =
            DashboardView::from_state(&self.controller.snapshot().await, self.maps.as_ref());
        println!("\n{}\n", idle.render());

        loop {
            let Some(request) = self.prompt_form(&last)? else {
                break;
            };

            let spinner = loading_spinner(&format!(
                "Analyzing locations for a {} in {}...",
                request.business_type, request.area
            ));
            self.controller.submit(&request).await;
            spinner.finish_and_clear();

            // Previous view (and its maps) is dropped before the next one mounts.
            let state = self.controller.snapshot().await;
            let view = DashboardView::from_state(&state, self.maps.as_ref());
            println!("\n{}\n", view.render());
            last = request;

            if !self.browse(&view)? {
                break;
            }
        }

        println!("Powered by Site Select AI © {}", chrono::Utc::now().year());
        info!("session finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completer_filters_static_list() {
        let mut c = SuggestionCompleter { entries: AREAS };
        let hits = c.get_suggestions("koram").unwrap();
        assert_eq!(hits, vec!["Koramangala, Bengaluru".to_string()]);
        assert!(c.get_suggestions("").unwrap().is_empty());
    }

    #[test]
    fn test_completion_takes_highlighted() {
        let mut c = SuggestionCompleter {
            entries: BUSINESS_TYPES,
        };
        assert_eq!(
            c.get_completion("caf", Some("Boutique Cafe".to_string())).unwrap(),
            Some("Boutique Cafe".to_string())
        );
        assert_eq!(c.get_completion("caf", None).unwrap(), None);
    }

    #[test]
    fn test_numeric_investment_validator() {
        assert!(matches!(numeric_investment("5000000").unwrap(), Validation::Valid));
        assert!(matches!(numeric_investment("five").unwrap(), Validation::Invalid(_)));
    }

    #[test]
    fn test_prompt_result_cancel_is_none() {
        let r: Result<Option<String>, DomainError> =
            prompt_result(Err(InquireError::OperationCanceled));
        assert!(r.unwrap().is_none());
    }
}
