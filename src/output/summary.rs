use owo_colors::OwoColorize;
use serde::Serialize;

use crate::scoring::BatchOutcome;

pub const DEFAULT_TOP_TARGETS: usize = 10;

/// Aggregate statistics over a scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub targets: usize,
    pub non_targets: usize,
    pub errors: usize,
    pub target_rate_percent: f64,
    /// Names of the best-scoring targets, highest first
    pub top_targets: Vec<TopTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTarget {
    pub entity_name: String,
    pub final_score: f64,
}

impl BatchSummary {
    /// Summarize `outcomes`. Target rate is over scored entities only.
    pub fn from_outcomes(outcomes: &[BatchOutcome], top: usize) -> Self {
        let scored: Vec<_> = outcomes.iter().filter_map(BatchOutcome::result).collect();
        let mut targets: Vec<_> = scored.iter().filter(|r| r.is_target()).collect();
        targets.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        let target_rate_percent = if scored.is_empty() {
            0.0
        } else {
            targets.len() as f64 / scored.len() as f64 * 100.0
        };

        Self {
            total: outcomes.len(),
            targets: targets.len(),
            non_targets: scored.len() - targets.len(),
            errors: outcomes.len() - scored.len(),
            target_rate_percent,
            top_targets: targets
                .iter()
                .take(top)
                .map(|r| TopTarget {
                    entity_name: r.entity_name.clone(),
                    final_score: r.final_score,
                })
                .collect(),
        }
    }

    pub fn format(&self, use_colors: bool) -> String {
        let counts = format!(
            "Total: {}  Targets: {}  Non-targets: {}  Errors: {}  Target rate: {:.1}%",
            self.total, self.targets, self.non_targets, self.errors, self.target_rate_percent
        );
        let mut lines = vec![if use_colors {
            counts.bold().to_string()
        } else {
            counts
        }];
        if !self.top_targets.is_empty() {
            lines.push("Top targets:".to_string());
            for (i, target) in self.top_targets.iter().enumerate() {
                lines.push(format!(
                    "  {:>2}. {:>5.1}  {}",
                    i + 1,
                    target.final_score,
                    target.entity_name
                ));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{EntityInput, ScoringConfig, ScoringEngine};
    use serde_json::{json, Map, Value};

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn outcomes() -> Vec<BatchOutcome> {
        let engine = ScoringEngine::new(ScoringConfig {
            reference_year: Some(2025),
            ..ScoringConfig::default()
        })
        .unwrap();
        let strong = attrs(json!({
            "employees": 6000,
            "annual_revenue": 1_500_000_000u64,
            "industry": "logistics",
            "city": "Istanbul",
        }));
        let stronger = attrs(json!({
            "employees": 6000,
            "annual_revenue": 1_500_000_000u64,
            "industry": "renewable energy",
            "city": "Ankara",
            "domain": "solar.com",
            "year_founded": 1990,
        }));
        engine.score_all(vec![
            EntityInput::new("Weak", Map::new()),
            EntityInput::new("Strong Lojistik A.Ş.", strong),
            EntityInput::new("", Map::new()),
            EntityInput::new("Stronger Enerji A.Ş.", stronger),
        ])
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_outcomes(&outcomes(), DEFAULT_TOP_TARGETS);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.targets, 2);
        assert_eq!(summary.non_targets, 1);
        assert_eq!(summary.errors, 1);
        assert!((summary.target_rate_percent - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.top_targets.len(), 2);
        assert!(summary.top_targets[0].final_score >= summary.top_targets[1].final_score);
    }

    #[test]
    fn test_summary_top_limit() {
        let summary = BatchSummary::from_outcomes(&outcomes(), 1);
        assert_eq!(summary.targets, 2);
        assert_eq!(summary.top_targets.len(), 1);
    }

    #[test]
    fn test_summary_empty_batch() {
        let summary = BatchSummary::from_outcomes(&[], DEFAULT_TOP_TARGETS);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.target_rate_percent, 0.0);
        assert!(summary.top_targets.is_empty());
        assert!(!summary.format(false).contains("Top targets"));
    }

    #[test]
    fn test_summary_format() {
        let text = BatchSummary::from_outcomes(&outcomes(), DEFAULT_TOP_TARGETS).format(false);
        assert!(text.contains("Total: 4  Targets: 2  Non-targets: 1  Errors: 1  Target rate: 66.7%"));
        assert!(text.contains("Top targets:"));
        assert!(text.contains(" 1. "));
    }
}
