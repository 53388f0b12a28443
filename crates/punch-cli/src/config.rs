//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use punch_core::InstallationId;
use punch_idle::{IdleThreshold, ThresholdError};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds without input before the user counts as away.
    pub idle_threshold_secs: u64,

    /// Preferred seconds between idle checks. Capped at half the threshold.
    pub poll_interval_secs: u64,

    /// Stamped on every recorded event to tell machines apart.
    pub installation_id: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            idle_threshold_secs: 300,
            poll_interval_secs: 5,
            installation_id: 1,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PUNCH_*)
        figment = figment.merge(Env::prefixed("PUNCH_"));

        figment.extract()
    }

    /// The configured threshold, or `override_secs` when given.
    pub fn idle_threshold(&self, override_secs: Option<u64>) -> Result<IdleThreshold, ThresholdError> {
        IdleThreshold::from_secs(override_secs.unwrap_or(self.idle_threshold_secs))
    }

    /// The preferred poll interval. Zero is rejected.
    pub fn poll_interval(&self) -> anyhow::Result<Duration> {
        anyhow::ensure!(
            self.poll_interval_secs > 0,
            "poll_interval_secs must be a positive number of seconds"
        );
        Ok(Duration::from_secs(self.poll_interval_secs))
    }

    /// The installation ID; negative values fall back to 0.
    pub fn installation(&self) -> InstallationId {
        InstallationId::new(self.installation_id).unwrap_or_default()
    }
}

/// Returns the platform-specific config directory for punch.
///
/// On Linux: `~/.config/punch`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_punch() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "punch");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.idle_threshold_secs, 300);
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(5));
        assert_eq!(config.installation().value(), 1);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.toml");
        std::fs::write(&path, "idle_threshold_secs = 600\ninstallation_id = 7\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.idle_threshold_secs, 600);
        assert_eq!(config.installation_id, 7);
        assert_eq!(config.poll_interval_secs, 5);
    }

    #[test]
    fn test_idle_threshold_override() {
        let config = Config::default();
        assert_eq!(config.idle_threshold(None).unwrap().secs(), 300);
        assert_eq!(config.idle_threshold(Some(60)).unwrap().secs(), 60);
        assert!(config.idle_threshold(Some(0)).is_err());
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.toml");
        std::fs::write(&path, "poll_interval_secs = 0\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        let err = config.poll_interval().unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn test_negative_installation_falls_back() {
        let config = Config {
            installation_id: -4,
            ..Config::default()
        };
        assert_eq!(config.installation().value(), 0);
    }
}
