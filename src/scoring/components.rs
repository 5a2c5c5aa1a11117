//! The five base-score component evaluators.
//!
//! Each evaluator reads the canonical record and returns a sub-score in
//! [0, 100]. They share no state and can run in any order.

use serde::Serialize;

use super::extract::{extract_decimal, extract_number};
use super::record::{EntityRecord, Field};
use super::rules::{CompiledRules, GeoRules};

/// Raw component scores, in weight order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub company_size: f64,
    pub industry_propensity: f64,
    pub financial_capacity: f64,
    pub geographic_presence: f64,
    pub additional_indicators: f64,
}

impl ComponentScores {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.company_size,
            self.industry_propensity,
            self.financial_capacity,
            self.geographic_presence,
            self.additional_indicators,
        ]
    }
}

pub fn evaluate_all(name: &str, record: &EntityRecord, rules: &CompiledRules) -> ComponentScores {
    ComponentScores {
        company_size: company_size(record, rules),
        industry_propensity: industry_propensity(record, rules),
        financial_capacity: financial_capacity(name, record, rules),
        geographic_presence: geographic_presence(record, &rules.geography),
        additional_indicators: additional_indicators(record, rules),
    }
}

pub fn company_size(record: &EntityRecord, rules: &CompiledRules) -> f64 {
    let mut score = rules.config.company_size.base;

    let employees = record.get(Field::Employees).map(extract_number).unwrap_or(0);
    score += rules.employee_brackets.bonus_for(employees as f64);

    let revenue = record.get(Field::Revenue).map(extract_decimal).unwrap_or(0.0);
    score += rules.revenue_brackets.bonus_for(revenue);

    clamp_score(score)
}

pub fn industry_propensity(record: &EntityRecord, rules: &CompiledRules) -> f64 {
    let propensity = &rules.config.propensity;
    let industry = record.lowercase_text(Field::Industry);
    if industry.trim().is_empty() {
        return clamp_score(propensity.default_score);
    }

    let score = propensity
        .groups
        .iter()
        .find(|group| group.terms.iter().any(|term| industry.contains(term.as_str())))
        .map(|group| group.score)
        .unwrap_or(propensity.default_score);

    clamp_score(score)
}

pub fn financial_capacity(name: &str, record: &EntityRecord, rules: &CompiledRules) -> f64 {
    let financial = &rules.config.financial;
    let mut score = financial.base;

    let founded = record.get(Field::YearFounded).map(extract_number).unwrap_or(0);
    if founded > 0 {
        let age = rules.reference_year as f64 - founded as f64;
        score += rules.age_brackets.bonus_for(age);
    }

    let lowered = name.to_lowercase();
    if financial
        .legal_suffixes
        .iter()
        .any(|suffix| lowered.contains(suffix.as_str()))
    {
        score += financial.legal_suffix_bonus;
    }

    if record.is_present(Field::Domain) {
        score += financial.domain_bonus;
    }

    clamp_score(score)
}

pub fn geographic_presence(record: &EntityRecord, geo: &GeoRules) -> f64 {
    let mut score = geo.base;

    if let Some(tier) = geo.locate(&record.lowercase_text(Field::City)) {
        score += tier.bonus;
    }

    let description = record.lowercase_text(Field::Description);
    if geo
        .international_terms
        .iter()
        .any(|term| description.contains(term.as_str()))
    {
        score += geo.international_bonus;
    }

    clamp_score(score)
}

pub fn additional_indicators(record: &EntityRecord, rules: &CompiledRules) -> f64 {
    let additional = &rules.config.additional;
    let mut score = additional.base;

    score += additional.contact_bonus * record.count_present(&additional.contact_fields) as f64;
    score += additional.social_bonus * record.count_present(&additional.social_fields) as f64;

    let description = record.text(Field::Description);
    score += rules
        .description_brackets
        .bonus_for(description.trim().chars().count() as f64);

    let lowered = description.to_lowercase();
    if additional
        .growth_terms
        .iter()
        .any(|term| lowered.contains(term.as_str()))
    {
        score += additional.growth_bonus;
    }

    clamp_score(score)
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Weighted sum helper shared with the aggregator.
pub(crate) fn weighted_sum(scores: &ComponentScores, weights: &[f64; 5]) -> f64 {
    scores
        .as_array()
        .iter()
        .zip(weights.iter())
        .map(|(score, weight)| score * weight)
        .sum()
}
