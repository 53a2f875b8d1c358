use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "walink";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_EXTENSION: &str = "csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input_dir: Option<PathBuf>,
    pub extension: String,
    pub backup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            backup: false,
        }
    }
}

impl AppConfig {
    pub fn input_dir_or_current(&self) -> PathBuf {
        self.input_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid extension value: {0:?}")]
    InvalidExtension(String),
    #[error("invalid input_dir value: {0}")]
    InvalidInputDir(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input_dir: Option<PathBuf>,
    extension: Option<String>,
    backup: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Checks a file extension given without its leading dot.
///
/// The extension only selects which file names are picked up; every input
/// is parsed as comma-delimited CSV.
pub fn validate_extension(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('.')
        || trimmed.contains(['/', '\\'])
        || trimmed.chars().any(char::is_whitespace)
    {
        return Err(ConfigError::InvalidExtension(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(dir) = parsed.input_dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidInputDir(dir));
        }
        config.input_dir = Some(expand_home(dir)?);
    }

    if let Some(extension) = parsed.extension {
        config.extension = validate_extension(&extension)?;
    }

    if let Some(backup) = parsed.backup {
        config.backup = backup;
    }

    Ok(config)
}

fn expand_home(path: PathBuf) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path),
    }
}
