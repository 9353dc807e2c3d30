//! Ranking of location analyses for display.
//!
//! The model's own ordering is not trusted: results are re-ranked by
//! `overall_score`, highest first. Equal scores keep their response order.

use crate::domain::LocationAnalysis;

/// A location with its 1-based display rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLocation<'a> {
    pub rank: usize,
    pub location: &'a LocationAnalysis,
}

/// Sort by score descending, tie-broken by original index, and number from 1.
pub fn rank_locations(locations: &[LocationAnalysis]) -> Vec<RankedLocation<'_>> {
    let mut order: Vec<(usize, &LocationAnalysis)> = locations.iter().enumerate().collect();
    order.sort_by(|(ia, a), (ib, b)| {
        b.overall_score
            .cmp(&a.overall_score)
            .then_with(|| ia.cmp(ib))
    });
    order
        .into_iter()
        .enumerate()
        .map(|(i, (_, location))| RankedLocation {
            rank: i + 1,
            location,
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{Demographics, Financials, MarketAnalysis, Risk, RiskLevel};

    pub(crate) fn sample_location(name: &str, score: i64) -> LocationAnalysis {
        LocationAnalysis {
            location_name: name.to_string(),
            address: format!("1 Market Street, {}", name),
            latitude: 12.9352,
            longitude: 77.6245,
            overall_score: score,
            summary: format!("{} has strong evening demand.", name),
            demographics: Demographics {
                population_density: "High".to_string(),
                avg_income: 1_500_000,
                dominant_age_group: "25-35".to_string(),
            },
            market_analysis: MarketAnalysis {
                foot_traffic: "High".to_string(),
                competitor_density: "Medium".to_string(),
            },
            financials: Financials {
                projected_revenue: [
                    2_400_000.0,
                    3_000_000.0,
                    3_600_000.0,
                    4_100_000.0,
                    4_500_000.0,
                ],
                projected_costs: [
                    2_800_000.0,
                    2_700_000.0,
                    2_900_000.0,
                    3_000_000.0,
                    3_100_000.0,
                ],
                break_even_year: 2,
                roi: 118.4,
            },
            risk: Risk {
                level: RiskLevel::Low,
                factors: "Rising rents".to_string(),
            },
        }
    }

    fn names(ranked: &[RankedLocation<'_>]) -> Vec<String> {
        ranked
            .iter()
            .map(|r| r.location.location_name.clone())
            .collect()
    }

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let input = vec![
            sample_location("a", 70),
            sample_location("b", 95),
            sample_location("c", 95),
            sample_location("d", 40),
        ];
        let ranked = rank_locations(&input);
        let scores: Vec<i64> = ranked.iter().map(|r| r.location.overall_score).collect();
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(scores, vec![95, 95, 70, 40]);
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(names(&ranked), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let input = vec![
            sample_location("x", 88),
            sample_location("y", 92),
            sample_location("z", 75),
        ];
        let first = names(&rank_locations(&input));
        let second = names(&rank_locations(&input));
        assert_eq!(first, second);
        assert_eq!(first, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_locations(&[]).is_empty());
    }
}
