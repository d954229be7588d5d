//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::user::Role;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub school: SchoolConfig,
    pub auth: AuthConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

/// School identity shown in the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolConfig {
    pub name: String,
}

/// Sign-in settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Role assigned to users signed in by the stub authenticator.
    #[serde(default)]
    pub default_role: Role,
}

/// Startup data settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON seed file replacing the built-in mock records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write a daily rolling log file.
    #[serde(default = "default_true")]
    pub file_enabled: bool,
    /// Log directory (default: platform data directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// UI preferences edited on the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub notify_enrollments: bool,
    #[serde(default = "default_true")]
    pub notify_reports: bool,
    #[serde(default = "default_true")]
    pub notify_system: bool,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "Scholar Records", "scholar-records")
}

impl AppConfig {
    /// Get config file path (platform config directory, else next to the executable).
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = project_dirs() {
            return dirs.config_dir().join("config.toml");
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.school.name.trim().is_empty() {
            return Err(ConfigError::Validation("School name cannot be empty".to_string()));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if let Some(seed) = &self.data.seed_file
            && seed.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation("Seed file path cannot be empty".to_string()));
        }
        let email = self.ui.contact_email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(ConfigError::Validation(
                "Contact email must contain '@'".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl LoggingConfig {
    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }
        project_dirs()
            .map(|d| d.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: "Scholar Records".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_enabled: true,
            directory: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            contact_email: String::new(),
            notify_enrollments: false,
            notify_reports: true,
            notify_system: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_school_name() {
        let mut config = AppConfig::default();
        config.school.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_log_level() {
        let mut config = AppConfig::default();

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_contact_email() {
        let mut config = AppConfig::default();
        config.ui.contact_email = "admin.school.edu".to_string();
        assert!(config.validate().is_err());

        config.ui.contact_email = "admin@school.edu".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [auth]
            default_role = "teacher"

            [logging]
            level = "warn"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.default_role, Role::Teacher);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file_enabled);
        assert_eq!(config.school.name, "Scholar Records");
        assert!(config.ui.notify_system);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = toml::from_str::<AppConfig>("[auth]\ndefault_role = \"principal\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir()
            .join(format!("scholar-records-test-{}", std::process::id()))
            .join("config.toml");

        let mut config = AppConfig::default();
        config.school.name = "Lincoln High".to_string();
        config.ui.notify_enrollments = true;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded, config),
            other => panic!("expected loaded config, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::try_load(Path::new("/nonexistent/scholar/config.toml"));
        assert!(matches!(result, ConfigLoadResult::Missing));
    }
}
