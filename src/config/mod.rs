mod init;
mod schema;

pub use init::write_default_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/lead-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("lead-score"))
}

/// Get the default config file path (~/.config/lead-score/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/lead-score/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error: the built-in scoring
/// tables are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::info!(
                    path = %default_path.display(),
                    "no config file, using built-in scoring tables"
                );
                return Ok(Config::default());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    tracing::info!(
        path = %config_path.display(),
        custom_scoring = config.scoring.is_some(),
        "loaded config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_temp("scoring:\n  target_threshold: 70\n  reference_year: 2024\n");
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        let scoring = config.effective_scoring();
        assert_eq!(scoring.target_threshold, 70.0);
        assert_eq!(scoring.reference_year, Some(2024));
        assert_eq!(scoring.industries.len(), 15);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = write_temp("{}\n");
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_scoring(), crate::scoring::ScoringConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let file = write_temp("scoring:\n  weights: [1, 2\n");
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let file = write_temp("queries: []\n");
        assert!(load_config(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_default_config_path() {
        if let Ok(path) = get_config_path() {
            assert!(path.ends_with(".config/lead-score/config.yaml"));
        }
    }
}
