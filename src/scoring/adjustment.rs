//! Bounded heuristic adjustment from description text and data completeness.

use serde::Serialize;

use super::record::{EntityRecord, Field};
use super::rules::CompiledRules;

pub const COMPLETENESS_SIGNAL: &str = "data_completeness";

/// One detected adjustment and whether composition kept it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentSignal {
    pub name: String,
    pub points: f64,
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub value: f64,
    /// In composition order (descending magnitude)
    pub signals: Vec<AdjustmentSignal>,
}

/// Detect every signal that fires for this record, in table order, with the
/// completeness bonus last.
pub fn detect_signals(record: &EntityRecord, rules: &CompiledRules) -> Vec<(String, f64)> {
    let adjustment = &rules.config.adjustment;
    let description = record.lowercase_text(Field::Description);
    let mut detected = Vec::new();

    if !description.trim().is_empty() {
        for signal in &adjustment.signals {
            let hit = signal
                .phrases
                .iter()
                .filter(|p| !p.is_empty())
                .any(|p| description.contains(&p.to_lowercase()));
            if hit && signal.points != 0.0 {
                detected.push((signal.name.clone(), signal.points));
            }
        }
    }

    let present = record.count_present(&adjustment.completeness_fields);
    let bonus = rules.completeness_brackets.bonus_for(present as f64);
    if bonus != 0.0 {
        detected.push((COMPLETENESS_SIGNAL.to_string(), bonus));
    }

    detected
}

/// Compose detected adjustments within `[-bound, bound]`.
///
/// Adjustments are visited in descending absolute magnitude (stable for
/// ties). Each one is kept only if the running total after adding it stays
/// inside the bound; otherwise it is skipped and the next one is tried.
pub fn compose(detected: Vec<(String, f64)>, bound: f64) -> Adjustment {
    let mut ordered = detected;
    ordered.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    let mut total = 0.0;
    let signals = ordered
        .into_iter()
        .map(|(name, points)| {
            let candidate = total + points;
            let applied = (-bound..=bound).contains(&candidate);
            if applied {
                total = candidate;
            }
            AdjustmentSignal {
                name,
                points,
                applied,
            }
        })
        .collect();

    Adjustment {
        value: total,
        signals,
    }
}

pub fn evaluate(record: &EntityRecord, rules: &CompiledRules) -> Adjustment {
    compose(detect_signals(record, rules), rules.config.adjustment_bound)
}
