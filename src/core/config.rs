/*
 * Application settings for the jump list manager: the application name, an optional
 * explicit AppUserModelID, and logging preferences. Settings are stored as pretty
 * JSON in the application's local configuration directory.
 *
 * Access goes through `ConfigManagerOperations` so callers and tests can swap the
 * storage. `CoreConfigManager` reads and writes the file; it can be pointed at a
 * fixed directory, which the tests do with a temporary one.
 */
use super::app_identity::AppUserModelId;
use super::path_utils;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoConfigDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration format error: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            ConfigError::NoConfigDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpListConfig {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub app_user_model_id: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_file: bool,
}

impl JumpListConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        JumpListConfig {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn app_user_model_id(&self) -> AppUserModelId {
        AppUserModelId::resolve(self.app_user_model_id.as_deref(), &self.app_name)
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for JumpListConfig {
    fn default() -> Self {
        JumpListConfig {
            app_name: "JumpListManager".to_string(),
            app_user_model_id: None,
            log_level: default_log_level(),
            log_to_file: false,
        }
    }
}

pub trait ConfigManagerOperations {
    /// Returns the stored config, or a default one for `app_name` if none is stored.
    fn load_config(&self, app_name: &str) -> Result<JumpListConfig>;
    fn save_config(&self, config: &JumpListConfig) -> Result<()>;
}

pub struct CoreConfigManager {
    config_dir_override: Option<PathBuf>,
}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {
            config_dir_override: None,
        }
    }

    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        CoreConfigManager {
            config_dir_override: Some(config_dir.into()),
        }
    }

    fn config_file_path(&self, app_name: &str) -> Result<PathBuf> {
        let dir = match &self.config_dir_override {
            Some(dir) => dir.clone(),
            None => path_utils::get_base_app_config_local_dir(app_name)
                .ok_or(ConfigError::NoConfigDirectory)?,
        };
        Ok(dir.join(path_utils::CONFIG_FILENAME))
    }

    fn read_config(file_path: &Path) -> Result<JumpListConfig> {
        let contents = fs::read_to_string(file_path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl CoreConfigManager {
    /// Like `load_config`, but writes the default config when none is stored yet so
    /// users have a file to edit.
    pub fn load_or_create_config(&self, app_name: &str) -> Result<JumpListConfig> {
        let file_path = self.config_file_path(app_name)?;
        if file_path.exists() {
            return self.load_config(app_name);
        }
        let config = JumpListConfig::new(app_name);
        self.save_config(&config)?;
        log::info!("CoreConfigManager: Created default config at {file_path:?}.");
        Ok(config)
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_config(&self, app_name: &str) -> Result<JumpListConfig> {
        let file_path = self.config_file_path(app_name)?;
        if !file_path.exists() {
            log::debug!("CoreConfigManager: No config at {file_path:?}, using defaults.");
            return Ok(JumpListConfig::new(app_name));
        }

        let mut config = Self::read_config(&file_path)?;
        if config.app_name.trim().is_empty() {
            config.app_name = app_name.to_string();
        }
        log::debug!("CoreConfigManager: Loaded config for '{}' from {file_path:?}.", config.app_name);
        Ok(config)
    }

    fn save_config(&self, config: &JumpListConfig) -> Result<()> {
        let file_path = self.config_file_path(&config.app_name)?;
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&file_path, json)?;
        log::debug!("CoreConfigManager: Saved config for '{}' to {file_path:?}.", config.app_name);
        Ok(())
    }
}
