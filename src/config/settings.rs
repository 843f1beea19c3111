//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data, and the JSON
//! settings file that supplies scan defaults.

use crate::cli::OutputFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{Resolver, DEFAULT_TCP_TIMEOUT, DEFAULT_UDP_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/pscan)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/pscan)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Locate the XDG directories for this application.
    ///
    /// Directories are not created here; writers create what they need.
    pub fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "pscan", "pscan").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the default host list.
    pub fn hosts_file(&self) -> PathBuf {
        self.data_dir.join("hosts")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Host list location; the XDG data directory is used when unset.
    pub hosts_file: Option<PathBuf>,
    /// Port specifications scanned when none are given.
    pub default_ports: Vec<String>,
    /// TCP connect timeout in milliseconds.
    pub tcp_timeout_ms: u64,
    /// UDP reply timeout in milliseconds.
    pub udp_timeout_ms: u64,
    /// Hostname resolution strategy.
    pub resolver: Resolver,
    /// Default output format.
    pub default_output_format: OutputFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hosts_file: None,
            default_ports: vec!["22-443".to_string()],
            tcp_timeout_ms: DEFAULT_TCP_TIMEOUT.as_millis() as u64,
            udp_timeout_ms: DEFAULT_UDP_TIMEOUT.as_millis() as u64,
            resolver: Resolver::System,
            default_output_format: OutputFormat::Plain,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The host list to use: the configured file, or the XDG default.
    pub fn hosts_file(&self) -> ConfigResult<PathBuf> {
        match &self.hosts_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Paths::new()?.hosts_file()),
        }
    }

    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_timeout_ms)
    }

    pub fn udp_timeout(&self) -> Duration {
        Duration::from_millis(self.udp_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths_in(dir: &TempDir) -> Paths {
        Paths {
            config_dir: dir.path().join("config"),
            data_dir: dir.path().join("data"),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_ports, vec!["22-443".to_string()]);
        assert_eq!(settings.tcp_timeout(), Duration::from_secs(1));
        assert_eq!(settings.udp_timeout(), Duration::from_millis(200));
        assert_eq!(settings.resolver, Resolver::System);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = AppSettings::load(&paths_in(&dir)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"udp_timeout_ms": 500, "resolver": "dns"}"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.udp_timeout(), Duration::from_millis(500));
        assert_eq!(settings.resolver, Resolver::Dns);
        assert_eq!(settings.tcp_timeout_ms, 1000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let result = AppSettings::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);

        let settings = AppSettings {
            hosts_file: Some(dir.path().join("targets")),
            default_ports: vec!["80".to_string(), "8000-8010".to_string()],
            ..AppSettings::default()
        };
        settings.save_to(&paths.settings_file()).unwrap();

        let loaded = AppSettings::load(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.hosts_file().unwrap(), dir.path().join("targets"));
    }

    #[test]
    fn test_paths_layout() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        assert_eq!(paths.hosts_file(), dir.path().join("data").join("hosts"));
        assert_eq!(
            paths.settings_file(),
            dir.path().join("config").join("settings.json")
        );
    }
}
