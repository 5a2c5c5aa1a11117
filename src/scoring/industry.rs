//! Keyword-table industry classification.

use serde::Serialize;

use super::config::{Confidence, IndustryProfile};

pub const DEFAULT_INDUSTRY: &str = "other";
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Outcome of classifying one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryMatch {
    pub tag: String,
    pub multiplier: f64,
    pub confidence: Confidence,
    /// Profile reasoning, empty when nothing matched
    pub reasoning: String,
    /// Accumulated keyword score of the winning profile
    pub keyword_score: usize,
}

impl IndustryMatch {
    pub fn unclassified() -> Self {
        Self {
            tag: DEFAULT_INDUSTRY.to_string(),
            multiplier: DEFAULT_MULTIPLIER,
            confidence: Confidence::Low,
            reasoning: String::new(),
            keyword_score: 0,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.keyword_score > 0
    }

    /// "Industry: <tag> | Multiplier: ×1.17 | <reasoning>"
    pub fn explanation(&self) -> String {
        let detail = if self.is_classified() && !self.reasoning.is_empty() {
            self.reasoning.as_str()
        } else {
            "Standard evaluation"
        };
        format!(
            "Industry: {} | Multiplier: ×{:.2} | {}",
            self.tag, self.multiplier, detail
        )
    }
}

/// Keyword weight: character length, doubled for keywords longer than five
/// characters.
pub fn keyword_weight(keyword: &str) -> usize {
    let len = keyword.chars().count();
    if len > 5 {
        len * 2
    } else {
        len
    }
}

/// Lower-cased search text built from the name, industry and description.
pub fn search_text(name: &str, industry: &str, description: &str) -> String {
    [name, industry, description]
        .iter()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sum of keyword weights for every keyword of `profile` found in `text`.
pub fn profile_score(profile: &IndustryProfile, text: &str) -> usize {
    profile
        .keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && text.contains(keyword.as_str()))
        .map(|keyword| keyword_weight(keyword))
        .sum()
}

/// Pick the profile with the strictly highest keyword score.
///
/// Ties keep the profile that appears first in `profiles`. When no profile
/// scores above zero the entity is unclassified: `other`, ×1.0, low.
pub fn classify(profiles: &[IndustryProfile], text: &str) -> IndustryMatch {
    let mut best: Option<(&IndustryProfile, usize)> = None;

    for profile in profiles {
        let score = profile_score(profile, text);
        let best_score = best.map(|(_, s)| s).unwrap_or(0);
        if score > best_score {
            best = Some((profile, score));
        }
    }

    match best {
        Some((profile, keyword_score)) => IndustryMatch {
            tag: profile.tag.clone(),
            multiplier: profile.multiplier,
            confidence: profile.confidence,
            reasoning: profile.reasoning.clone(),
            keyword_score,
        },
        None => IndustryMatch::unclassified(),
    }
}
