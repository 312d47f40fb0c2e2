//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Default display window length in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest accepted display window length in days.
pub const MAX_WINDOW_DAYS: u32 = 9999;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory of the day-bucketed statistics store.
    pub storage_root: PathBuf,
    /// How many days of statistics to display by default.
    pub window_days: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("storage_root", &self.storage_root)
            .field("window_days", &self.window_days)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            storage_root: data_dir,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

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

        // Load from environment variables (RABBIT_*)
        figment = figment.merge(Env::prefixed("RABBIT_"));

        let config: Self = figment.extract()?;
        if config.window_days > MAX_WINDOW_DAYS {
            return Err(figment::Error::from(format!(
                "window_days must be between 0 and {MAX_WINDOW_DAYS}, got {}",
                config.window_days
            )));
        }
        Ok(config)
    }
}

/// Returns the platform-specific config directory for rabbit.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rabbit"))
}

/// Returns the platform-specific data directory for rabbit.
///
/// On Linux: `~/.local/share/rabbit`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rabbit"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_dirs_data_path_returns_some() {
        assert!(dirs_data_path().is_some());
    }

    #[test]
    fn test_dirs_data_path_ends_with_rabbit() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "rabbit");
    }

    #[test]
    fn test_default_window_is_seven_days() {
        assert_eq!(Config::default().window_days, 7);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "storage_root = \"/tmp/rabbit-stats\"").unwrap();
        writeln!(file, "window_days = 30").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.storage_root, PathBuf::from("/tmp/rabbit-stats"));
        assert_eq!(config.window_days, 30);
    }

    #[test]
    fn test_window_days_out_of_range_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_days = 10000").unwrap();
        file.flush().unwrap();

        assert!(Config::load_from(Some(file.path())).is_err());
    }

    #[test]
    fn test_window_days_upper_bound_is_accepted() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_days = 9999").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.window_days, 9999);
    }
}
