//! Terminal bar chart of the 5-year revenue vs cost projection.

use crate::adapters::ui::format::{format_inr, format_inr_compact};
use crate::domain::Financials;
use crossterm::style::Stylize;

/// Default width of the longest bar, in cells.
pub const DEFAULT_BAR_WIDTH: usize = 32;

/// Length of the bar for `value` when `max` spans `width` cells.
///
/// Non-positive values draw nothing; any positive value draws at least one cell.
pub fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if value <= 0.0 || max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let cells = (value / max * width as f64).round() as usize;
    cells.clamp(1, width)
}

/// Grouped bars, one revenue and one cost bar per year.
pub fn render_chart(financials: &Financials, width: usize) -> Vec<String> {
    let max = financials
        .projected_revenue
        .iter()
        .chain(financials.projected_costs.iter())
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut lines = vec![format!("{} Revenue   {} Costs", "■".green(), "■".magenta())];
    for year in financials.years() {
        // Pad before styling: styled content ignores width flags.
        let revenue = format!(
            "{:<w$}",
            "█".repeat(bar_len(year.revenue, max, width)),
            w = width
        );
        let costs = format!(
            "{:<w$}",
            "█".repeat(bar_len(year.costs, max, width)),
            w = width
        );
        lines.push(format!(
            "Y{} {} {}",
            year.year,
            revenue.green(),
            format_inr_compact(year.revenue)
        ));
        lines.push(format!("   {} {}", costs.magenta(), format_inr_compact(year.costs)));
    }
    lines.push(format!("   0{:>w$}", format_inr_compact(max), w = width));
    lines
}

/// Year-by-year detail: revenue, costs and derived profit in full INR.
pub fn render_year_details(financials: &Financials) -> Vec<String> {
    financials
        .years()
        .map(|year| {
            let profit = year.profit();
            let profit_text = format!("Profit: {}", format_inr(profit));
            let profit_styled = if profit < 0.0 {
                profit_text.red()
            } else {
                profit_text.cyan()
            };
            format!(
                "Year {}  Revenue: {}  Costs: {}  {}",
                year.year,
                format_inr(year.revenue),
                format_inr(year.costs),
                profit_styled
            )
        })
        .collect()
}
