//! Configuration types and loading for the keg package builder.
//!
//! The main entry point is [`KegConfig`], which represents the contents of
//! `config.yaml` under the keg home. Configuration is loaded with
//! [`load_config`] and saved with [`save_config`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The user's home directory could not be determined.
    #[error("could not determine home directory (set KEG_HOME)")]
    HomeNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full keg configuration, corresponding to `<home>/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// (or no file at all) deserializes to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KegConfig {
    /// Extra formula directories searched before `<home>/taps`.
    /// Relative entries are resolved against the keg home.
    #[serde(default)]
    pub taps: Vec<String>,

    /// Cellar directory override. Relative entries are resolved against
    /// the keg home.
    #[serde(default)]
    pub cellar: Option<String>,

    /// Download cache directory override.
    #[serde(default)]
    pub cache: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given keg home.
///
/// If the file does not exist, a default [`KegConfig`] is returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// or [`ConfigError::ParseError`] if it contains invalid YAML.
pub fn load_config(home_dir: &Path) -> Result<KegConfig> {
    let config_path = home_dir.join("config.yaml");

    if !config_path.exists() {
        return Ok(KegConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;

    // An empty file is valid and yields default config.
    if content.trim().is_empty() {
        return Ok(KegConfig::default());
    }

    let config: KegConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given keg home.
///
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or
/// [`ConfigError::ParseError`] if serialization fails.
pub fn save_config(home_dir: &Path, config: &KegConfig) -> Result<()> {
    std::fs::create_dir_all(home_dir)?;

    let config_path = home_dir.join("config.yaml");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_empty() {
        let cfg = KegConfig::default();
        assert!(cfg.taps.is_empty());
        assert!(cfg.cellar.is_none());
        assert!(cfg.cache.is_none());
    }

    #[test]
    fn load_missing_config_returns_default() {
        let dir = PathBuf::from("/nonexistent/path/.keg");
        let cfg = load_config(&dir).unwrap();
        assert!(cfg.taps.is_empty());
    }

    #[test]
    fn roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join(".keg");

        let mut cfg = KegConfig::default();
        cfg.taps = vec!["/srv/formulas".to_string()];
        cfg.cellar = Some("cellar".to_string());

        save_config(&home, &cfg).unwrap();
        let loaded = load_config(&home).unwrap();

        assert_eq!(loaded.taps, vec!["/srv/formulas"]);
        assert_eq!(loaded.cellar.as_deref(), Some("cellar"));
        assert!(loaded.cache.is_none());
    }

    #[test]
    fn deserialize_partial_yaml() {
        let yaml = "taps:\n  - /srv/formulas\n";
        let cfg: KegConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.taps, vec!["/srv/formulas"]);
        // Everything else should be default
        assert!(cfg.cellar.is_none());
    }
}
