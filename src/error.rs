use thiserror::Error;

/// Errors surfaced by a single scoring call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("entity name is missing or empty")]
    EmptyName,

    /// Unexpected fault while scoring; only produced by batch isolation.
    #[error("internal scoring fault: {0}")]
    Internal(String),
}

/// Scoring tables that failed validation, every problem listed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid scoring configuration:\n  - {}", .errors.join("\n  - "))]
pub struct ConfigError {
    pub errors: Vec<String>,
}

impl ConfigError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_error_messages() {
        assert!(ScoreError::EmptyName.to_string().contains("empty"));
        let err = ScoreError::Internal("boom".to_string());
        assert_eq!(err.to_string(), "internal scoring fault: boom");
    }

    #[test]
    fn test_config_error_lists_all() {
        let err = ConfigError::new(vec!["a: bad".to_string(), "b: worse".to_string()]);
        let text = err.to_string();
        assert!(text.contains("  - a: bad"));
        assert!(text.contains("  - b: worse"));
    }
}
