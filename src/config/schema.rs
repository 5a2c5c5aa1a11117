use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

/// Top-level config file. Every section is optional; missing sections take
/// the compiled-in defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    /// Scoring tables in effect: the file's section or the defaults.
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
