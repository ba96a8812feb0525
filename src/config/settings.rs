//! Application settings and paths.
//!
//! Settings live in an XDG-compliant location and only supply defaults;
//! anything given on the command line wins.

use crate::error::{ConfigError, ConfigResult};
use crate::output::ReportFormat;
use crate::scanner::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portaudit)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform's configuration directory.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portaudit", "portaudit")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Maximum probes in flight.
    pub concurrency: usize,
    /// Per-operation timeout in seconds.
    pub timeout_secs: f64,
    /// Probes started per second, 0 for unlimited.
    pub rate_limit: u32,
    /// Format used for saved reports when none is given or inferable.
    pub format: Option<ReportFormat>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            rate_limit: 0,
            format: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file, or a platform without a config directory, yields
    /// the defaults.
    pub fn load() -> ConfigResult<Self> {
        let Ok(paths) = Paths::discover() else {
            debug!("no configuration directory, using default settings");
            return Ok(Self::default());
        };
        let file = paths.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file, which must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.concurrency, 50);
        assert_eq!(settings.timeout_secs, 0.5);
        assert_eq!(settings.rate_limit, 0);
        assert_eq!(settings.format, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "concurrency": 10, "format": "json" }"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.concurrency, 10);
        assert_eq!(settings.format, Some(ReportFormat::Json));
        assert_eq!(settings.timeout_secs, 0.5);
    }

    #[test]
    fn test_txt_format_name() {
        let settings: AppSettings = serde_json::from_str(r#"{ "format": "txt" }"#).unwrap();
        assert_eq!(settings.format, Some(ReportFormat::Text));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }
}
