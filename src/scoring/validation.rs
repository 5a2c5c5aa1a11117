use std::collections::HashSet;

use super::config::{Bracket, ScoringConfig};
use super::factors::RangeOp;
use super::industry::DEFAULT_INDUSTRY;

const MIN_MULTIPLIER: f64 = 0.70;
const MAX_MULTIPLIER: f64 = 1.20;
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(0.0..=100.0).contains(&config.target_threshold) {
        errors.push("scoring.target_threshold: must be between 0 and 100".to_string());
    }
    if !(config.adjustment_bound > 0.0 && config.adjustment_bound <= 100.0) {
        errors.push("scoring.adjustment_bound: must be in (0, 100]".to_string());
    }

    // Weights
    let weights = [
        ("company_size", config.weights.company_size),
        ("industry_propensity", config.weights.industry_propensity),
        ("financial_capacity", config.weights.financial_capacity),
        ("geographic_presence", config.weights.geographic_presence),
        ("additional_indicators", config.weights.additional_indicators),
    ];
    for (name, weight) in weights {
        if !(weight >= 0.0) {
            errors.push(format!("scoring.weights.{}: must be non-negative", name));
        }
    }
    let sum = config.weights.sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        errors.push(format!("scoring.weights: must sum to 1.0 (got {:.4})", sum));
    }

    // Bracket tables
    check_brackets(
        &mut errors,
        "scoring.company_size.employee_brackets",
        &config.company_size.employee_brackets,
    );
    check_brackets(
        &mut errors,
        "scoring.company_size.revenue_brackets",
        &config.company_size.revenue_brackets,
    );
    check_brackets(
        &mut errors,
        "scoring.financial.age_brackets",
        &config.financial.age_brackets,
    );
    check_brackets(
        &mut errors,
        "scoring.additional.description_brackets",
        &config.additional.description_brackets,
    );
    check_brackets(
        &mut errors,
        "scoring.adjustment.completeness_brackets",
        &config.adjustment.completeness_brackets,
    );
    for (i, descriptor) in config.explanation.size_descriptors.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&descriptor.range) {
            errors.push(format!(
                "scoring.explanation.size_descriptors[{}].range: invalid '{}' - {}",
                i, descriptor.range, e
            ));
        }
    }

    // Propensity groups
    for (i, group) in config.propensity.groups.iter().enumerate() {
        if !(0.0..=100.0).contains(&group.score) {
            errors.push(format!(
                "scoring.propensity.groups[{}].score: must be between 0 and 100",
                i
            ));
        }
        check_terms(
            &mut errors,
            &format!("scoring.propensity.groups[{}].terms", i),
            &group.terms,
        );
    }
    if !(0.0..=100.0).contains(&config.propensity.default_score) {
        errors.push("scoring.propensity.default_score: must be between 0 and 100".to_string());
    }

    // Industry profiles
    let mut seen_tags = HashSet::new();
    for (i, profile) in config.industries.iter().enumerate() {
        let tag = profile.tag.trim();
        if tag.is_empty() {
            errors.push(format!("scoring.industries[{}].tag: must not be empty", i));
        } else if tag == DEFAULT_INDUSTRY {
            errors.push(format!(
                "scoring.industries[{}].tag: '{}' is reserved for unclassified entities",
                i, DEFAULT_INDUSTRY
            ));
        } else if !seen_tags.insert(tag) {
            errors.push(format!("scoring.industries[{}].tag: duplicate '{}'", i, tag));
        }
        if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&profile.multiplier) {
            errors.push(format!(
                "scoring.industries[{}].multiplier: {} outside {:.2}-{:.2}",
                i, profile.multiplier, MIN_MULTIPLIER, MAX_MULTIPLIER
            ));
        }
        check_terms(
            &mut errors,
            &format!("scoring.industries[{}].keywords", i),
            &profile.keywords,
        );
    }

    // Geography
    let tier_count = config.geography.tiers.len();
    for (i, tier) in config.geography.tiers.iter().enumerate() {
        if tier.name.trim().is_empty() {
            errors.push(format!("scoring.geography.tiers[{}].name: must not be empty", i));
        }
        if tier.cities.is_empty() && i + 1 != tier_count {
            errors.push(format!(
                "scoring.geography.tiers[{}]: catch-all tier (no cities) must be last",
                i
            ));
        }
    }

    // Adjustment signals
    for (i, signal) in config.adjustment.signals.iter().enumerate() {
        if signal.name.trim().is_empty() {
            errors.push(format!("scoring.adjustment.signals[{}].name: must not be empty", i));
        }
        check_terms(
            &mut errors,
            &format!("scoring.adjustment.signals[{}].phrases", i),
            &signal.phrases,
        );
    }

    // Reasoning tiers
    let tiers = &config.explanation.score_tiers;
    for (i, pair) in tiers.windows(2).enumerate() {
        if pair[1].min_score >= pair[0].min_score {
            errors.push(format!(
                "scoring.explanation.score_tiers[{}].min_score: must be below {}",
                i + 1,
                pair[0].min_score
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_brackets(errors: &mut Vec<String>, path: &str, brackets: &[Bracket]) {
    for (i, bracket) in brackets.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&bracket.range) {
            errors.push(format!(
                "{}[{}].range: invalid '{}' - {}",
                path, i, bracket.range, e
            ));
        }
        if !bracket.bonus.is_finite() {
            errors.push(format!("{}[{}].bonus: must be a finite number", path, i));
        }
    }
}

/// Terms are matched against lower-cased text, so they must be lower-case.
fn check_terms(errors: &mut Vec<String>, path: &str, terms: &[String]) {
    if terms.is_empty() {
        errors.push(format!("{}: must not be empty", path));
    }
    for (i, term) in terms.iter().enumerate() {
        if term.trim().is_empty() {
            errors.push(format!("{}[{}]: must not be blank", path, i));
        } else if term.to_lowercase() != *term {
            errors.push(format!("{}[{}]: '{}' must be lower-case", path, i, term));
        }
    }
}
