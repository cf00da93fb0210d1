//! User configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CelcatError, CelcatResult};

/// Prefix of environment variables overriding configuration keys.
const ENV_PREFIX: &str = "CELCAT_ICS";

/// Configuration at ~/.config/celcat-ics/config.toml
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct CelcatConfig {
    /// Filter expression applied when none is given on the command line
    pub filter: Option<String>,

    /// File to write logs to instead of stderr
    pub log_file: Option<PathBuf>,

    /// Calendar name used instead of the document's subheading
    pub calendar_name: Option<String>,

    pub prodid: Option<String>,
}

impl CelcatConfig {
    pub fn config_path() -> CelcatResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CelcatError::Config("Could not determine config directory".into()))?
            .join("celcat-ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> CelcatResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CelcatResult<Self> {
        let config: CelcatConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| CelcatError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CelcatError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Log file path with `~` expanded
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(|p| expand_tilde(p))
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CelcatConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.filter, None);
        assert_eq!(config.calendar_name, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "filter = \"TPA31:Info\"\ncalendar_name = \"Mon emploi du temps\"\nlog_file = \"~/celcat.log\"\n",
        )
        .unwrap();

        let config = CelcatConfig::load_from(&path).unwrap();
        assert_eq!(config.filter.as_deref(), Some("TPA31:Info"));
        assert_eq!(config.calendar_name.as_deref(), Some("Mon emploi du temps"));

        let log_file = config.log_file_path().unwrap();
        assert!(
            !log_file.to_string_lossy().starts_with('~'),
            "Tilde should be expanded: {}",
            log_file.display()
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "filter = [unterminated").unwrap();

        let err = CelcatConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CelcatError::Config(_)), "Unexpected error: {err}");
    }
}
