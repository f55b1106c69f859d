use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

/// Environment variable that overrides `web.admin_password`
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Configuration for a schedule build and the web viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source tables
    pub input: InputConfig,

    /// Where the JSON schedule goes
    pub output: OutputConfig,

    /// Web viewer settings
    pub web: WebConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Channel reference CSV: name, live URL, optional embed URL
    pub channels: PathBuf,

    /// Raw schedule CSV: start time, day category, program, channels
    pub schedule: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            channels: PathBuf::from("URLs.csv"),
            schedule: PathBuf::from("rawTable.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schedule.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub port: u16,

    /// Required for uploads; uploads are refused while unset
    pub admin_password: Option<String>,

    /// Directory served under /static, if present
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_password: None,
            static_dir: None,
        }
    }
}

impl Config {
    /// Loads a TOML config file, or the defaults when no file is given.
    /// The admin password can always be overridden from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                config.web.admin_password = Some(password);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScheduleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|message| ScheduleError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
