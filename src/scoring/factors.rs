use anyhow::{bail, Result};

use super::config::Bracket;

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(parse_bound(val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "100-500"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low = parse_bound(parts[0])?;
                let high = parse_bound(parts[1])?;
                if low > high {
                    bail!("Range lower bound exceeds upper bound: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(parse_bound(s)?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// Parse a bound, accepting `_` digit separators ("1_000_000_000").
fn parse_bound(raw: &str) -> Result<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        bail!("Missing number in range: '{}'", raw)
    }
    let value: f64 = cleaned.parse()?;
    if !value.is_finite() {
        bail!("Range bound must be finite: '{}'", raw)
    }
    Ok(value)
}

/// A bracket with its range already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBracket<T> {
    pub range: RangeOp,
    pub value: T,
}

/// Ordered bracket table; the first matching bracket wins.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketTable<T> {
    brackets: Vec<CompiledBracket<T>>,
}

impl<T: Clone> BracketTable<T> {
    pub fn compile<B, F>(raw: &[B], get_range: F, get_value: impl Fn(&B) -> T) -> Result<Self>
    where
        F: Fn(&B) -> &str,
    {
        let brackets = raw
            .iter()
            .map(|b| {
                Ok(CompiledBracket {
                    range: RangeOp::parse(get_range(b))?,
                    value: get_value(b),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { brackets })
    }

    pub fn lookup(&self, value: f64) -> Option<&T> {
        self.brackets
            .iter()
            .find(|b| b.range.matches(value))
            .map(|b| &b.value)
    }
}

impl BracketTable<f64> {
    /// Compile score-bonus brackets.
    pub fn bonuses(raw: &[Bracket]) -> Result<Self> {
        Self::compile(raw, |b| b.range.as_str(), |b| b.bonus)
    }

    /// Bonus of the first matching bracket, or 0 when nothing matches.
    pub fn bonus_for(&self, value: f64) -> f64 {
        self.lookup(value).copied().unwrap_or(0.0)
    }
}
