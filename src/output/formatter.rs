use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{BatchOutcome, IndustryMatch, IndustryProfile, Priority, ScoreResult};

/// Keywords listed per profile by `format_industries`
const INDUSTRY_KEYWORDS_SHOWN: usize = 5;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal ("72.4")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn format_priority(priority: Priority, use_colors: bool) -> String {
    let label = format!("{:<10}", priority.as_str());
    match (use_colors, priority) {
        (false, _) => label,
        (true, Priority::Target) => label.green().bold().to_string(),
        (true, Priority::NonTarget) => label.dimmed().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format outcomes as a ranked table: Index, Score, Priority, Name, Industry.
/// No headers. Failed entities show "-" as score and the error in place of
/// the industry.
pub fn format_scored_table(outcomes: &[BatchOutcome], use_colors: bool) -> String {
    if outcomes.is_empty() {
        return "No entities scored.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 5;
    let priority_width = 10;
    let separator = "  ";

    outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| {
            let index_str = format!("{:>2}.", idx + 1);

            let (score_str, priority_str, trailer) = match outcome {
                BatchOutcome::Scored(result) => (
                    format_score(result.final_score),
                    format_priority(result.priority, use_colors),
                    result.detected_industry.clone(),
                ),
                BatchOutcome::Failed { error, .. } => {
                    let label = format!("{:<10}", "error");
                    let label = if use_colors {
                        label.red().to_string()
                    } else {
                        label
                    };
                    ("-".to_string(), label, error.clone())
                }
            };
            let score_padded = format!("{:>width$}", score_str, width = score_width);

            let fixed_width = index_width
                + 1
                + score_width
                + priority_width
                + separator.len() * 3
                + trailer.chars().count();
            let name = outcome.entity_name();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
                Some(_) => truncate_name(name, 20),
                None => name.to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    priority_str,
                    separator,
                    name,
                    separator,
                    trailer.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, priority_str, separator, name, separator,
                    trailer
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line breakdown of one result: every layer and the signals behind it.
pub fn format_result_detail(result: &ScoreResult, use_colors: bool) -> String {
    let c = &result.components;
    let mut lines = Vec::new();

    let header = format!(
        "{}  {} ({})",
        result.entity_name,
        format_score(result.final_score),
        result.priority
    );
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });
    lines.push(format!("  {}", result.reasoning));
    lines.push("  Components:".to_string());
    for (label, value) in [
        ("company size", c.company_size),
        ("industry propensity", c.industry_propensity),
        ("financial capacity", c.financial_capacity),
        ("geographic presence", c.geographic_presence),
        ("additional indicators", c.additional_indicators),
    ] {
        lines.push(format!("    {:<22}{:>6}", label, format_score(value)));
    }
    lines.push(format!("  Base score: {}", format_score(result.base_score)));
    lines.push(format!(
        "  {} ({} confidence)",
        result.industry_explanation, result.industry_confidence
    ));
    lines.push(format!(
        "  Industry-adjusted: {}",
        format_score(result.industry_adjusted_score)
    ));
    lines.push(format!("  Adjustment: {:+.1}", result.adjustment));
    for signal in &result.adjustment_signals {
        let marker = if signal.applied { "+" } else { "skipped" };
        lines.push(format!("    {:<20}{:>+6.1}  {}", signal.name, signal.points, marker));
    }
    lines.push(format!(
        "  Final score: {}  ({:.2}ms)",
        format_score(result.final_score),
        result.elapsed.as_secs_f64() * 1000.0
    ));

    lines.join("\n")
}

/// Format outcomes as tab-separated values for scripting
/// Columns: score, priority, name, industry (no headers, no colors).
/// Failed entities: "-", "error", name, error message.
pub fn format_tsv(outcomes: &[BatchOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            BatchOutcome::Scored(result) => format!(
                "{}\t{}\t{}\t{}",
                format_score(result.final_score),
                result.priority,
                result.entity_name,
                result.detected_industry
            ),
            BatchOutcome::Failed { entity_name, error } => {
                format!("-\terror\t{}\t{}", entity_name, error)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Industry profile table, one line per profile plus the `other` fallback.
/// Each line shows multiplier, confidence, reasoning and the first keywords.
pub fn format_industries(profiles: &[IndustryProfile], use_colors: bool) -> String {
    let fallback = IndustryMatch::unclassified();
    let tag_width = profiles
        .iter()
        .map(|p| p.tag.chars().count())
        .chain(std::iter::once(fallback.tag.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = profiles
        .iter()
        .map(|profile| {
            let keywords = profile
                .keywords
                .iter()
                .take(INDUSTRY_KEYWORDS_SHOWN)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            industry_line(
                &profile.tag,
                profile.multiplier,
                profile.confidence.as_str(),
                &profile.reasoning,
                &keywords,
                tag_width,
                use_colors,
            )
        })
        .collect();

    lines.push(industry_line(
        &fallback.tag,
        fallback.multiplier,
        fallback.confidence.as_str(),
        "Standard evaluation",
        "",
        tag_width,
        use_colors,
    ));
    lines.join("\n")
}

fn industry_line(
    tag: &str,
    multiplier: f64,
    confidence: &str,
    reasoning: &str,
    keywords: &str,
    tag_width: usize,
    use_colors: bool,
) -> String {
    let tag = format!("{:<width$}", tag, width = tag_width);
    let multiplier = format!("×{:.2}", multiplier);
    let confidence = format!("{:<6}", confidence);
    let keywords = if keywords.is_empty() {
        String::new()
    } else {
        format!("  [{}]", keywords)
    };
    if use_colors {
        format!(
            "{}  {}  {}  {}{}",
            tag.bold(),
            multiplier.cyan(),
            confidence.yellow(),
            reasoning,
            keywords.dimmed()
        )
    } else {
        format!("{}  {}  {}  {}{}", tag, multiplier, confidence, reasoning, keywords)
    }
}
