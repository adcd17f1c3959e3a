use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

/// Name of the manifest file listing the exercises, inside the exercises directory
pub const DEFAULT_MANIFEST: &str = "index.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    /// Directory holding the manifest and the exercise files
    pub exercises_dir: Option<PathBuf>,
    /// File name of the manifest inside `exercises_dir`
    pub manifest: String,
    /// Ring the terminal bell when an exercise is completed
    pub sound: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            exercises_dir: None,
            manifest: DEFAULT_MANIFEST.to_string(),
            sound: true,
            log_file: None,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
}

impl Config {
    /// Load the configuration
    ///
    /// Layers, lowest priority first: defaults, `settings.toml` in the config directory, then
    /// `SEGUNDO_*` environment variables (`SEGUNDO_THEME__TEXT__INCORRECT=red` for nested keys).
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Segundo", "Segundo")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        let settings: Settings = settings
            .merge(Env::prefixed("SEGUNDO_").split("__"))
            .extract()
            .map_err(Box::new)?;

        Ok(Self {
            settings,
            config_dir,
        })
    }

    /// Directory the exercises are read from. Defaults to `<config>/exercises`
    pub fn exercises_dir(&self) -> PathBuf {
        self.settings
            .exercises_dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join("exercises"))
    }

    /// File the log is written to. Defaults to `<config>/segundo.log`
    pub fn log_file(&self) -> PathBuf {
        self.settings
            .log_file
            .clone()
            .unwrap_or_else(|| self.config_dir.join("segundo.log"))
    }
}
