use super::config::{GeoTier, ScoreTier};
use super::industry::IndustryMatch;
use super::rules::CompiledRules;

/// Intermediate values the reasoning string is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationInput<'a> {
    pub final_score: f64,
    pub industry: &'a IndustryMatch,
    pub employees: u64,
    pub geo_tier: Option<&'a GeoTier>,
}

/// Label of the first tier whose `min_score` the score reaches.
pub fn score_tier_label<'a>(tiers: &'a [ScoreTier], fallback: &'a str, score: f64) -> &'a str {
    tiers
        .iter()
        .find(|tier| score >= tier.min_score)
        .map(|tier| tier.label.as_str())
        .unwrap_or(fallback)
}

/// Render the reasoning string, e.g.
/// "Strong target • Industry: utilities (×1.15) • Large enterprise • Prime market location".
pub fn explain(input: &ExplanationInput<'_>, rules: &CompiledRules) -> String {
    let explanation = &rules.config.explanation;
    let mut reasons = vec![
        score_tier_label(
            &explanation.score_tiers,
            &explanation.fallback_label,
            input.final_score,
        )
        .to_string(),
        format!(
            "Industry: {} (×{:.2})",
            input.industry.tag, input.industry.multiplier
        ),
    ];

    if let Some(label) = rules.size_descriptors.lookup(input.employees as f64) {
        reasons.push(label.clone());
    }

    if let Some(descriptor) = input.geo_tier.and_then(|tier| tier.descriptor.as_ref()) {
        reasons.push(descriptor.clone());
    }

    reasons.join(&explanation.separator)
}
