//! Scoring tables compiled once at startup.

use anyhow::{Context, Result};
use chrono::Datelike;

use super::config::{GeoTier, ScoringConfig};
use super::factors::BracketTable;

/// A validated [`ScoringConfig`] with every range expression parsed.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub config: ScoringConfig,
    pub reference_year: i32,
    pub employee_brackets: BracketTable<f64>,
    pub revenue_brackets: BracketTable<f64>,
    pub age_brackets: BracketTable<f64>,
    pub description_brackets: BracketTable<f64>,
    pub completeness_brackets: BracketTable<f64>,
    pub size_descriptors: BracketTable<String>,
    pub geography: GeoRules,
}

impl CompiledRules {
    pub fn compile(config: ScoringConfig) -> Result<Self> {
        let reference_year = config
            .reference_year
            .unwrap_or_else(|| chrono::Utc::now().year());

        Ok(Self {
            reference_year,
            employee_brackets: BracketTable::bonuses(&config.company_size.employee_brackets)
                .context("company_size.employee_brackets")?,
            revenue_brackets: BracketTable::bonuses(&config.company_size.revenue_brackets)
                .context("company_size.revenue_brackets")?,
            age_brackets: BracketTable::bonuses(&config.financial.age_brackets)
                .context("financial.age_brackets")?,
            description_brackets: BracketTable::bonuses(&config.additional.description_brackets)
                .context("additional.description_brackets")?,
            completeness_brackets: BracketTable::bonuses(
                &config.adjustment.completeness_brackets,
            )
            .context("adjustment.completeness_brackets")?,
            size_descriptors: BracketTable::compile(
                &config.explanation.size_descriptors,
                |d| d.range.as_str(),
                |d| d.label.clone(),
            )
            .context("explanation.size_descriptors")?,
            geography: GeoRules::from_config(&config),
            config,
        })
    }
}

/// City tier lookup table, lower-cased.
#[derive(Debug, Clone)]
pub struct GeoRules {
    pub base: f64,
    pub tiers: Vec<GeoTier>,
    pub international_terms: Vec<String>,
    pub international_bonus: f64,
}

impl GeoRules {
    fn from_config(config: &ScoringConfig) -> Self {
        let geo = &config.geography;
        Self {
            base: geo.base,
            tiers: geo
                .tiers
                .iter()
                .map(|tier| GeoTier {
                    cities: tier.cities.iter().map(|c| c.trim().to_lowercase()).collect(),
                    ..tier.clone()
                })
                .collect(),
            international_terms: geo.international_terms.iter().map(|t| t.to_lowercase()).collect(),
            international_bonus: geo.international_bonus,
        }
    }

    /// First tier whose city list names `city`, in table order. A tier with
    /// an empty city list accepts any non-empty city. Blank input matches
    /// nothing.
    pub fn locate(&self, city: &str) -> Option<&GeoTier> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }
        self.tiers.iter().find(|tier| {
            tier.cities.is_empty() || tier.cities.iter().any(|name| contains_word(city, name))
        })
    }
}

/// `needle` occurs in `haystack` with no alphanumeric character directly on
/// either side, so "istanbul, turkey" names istanbul but "savan" is not "van".
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
