//! Process configuration read from the environment.
//!
//! | variable          | default                        |
//! |-------------------|--------------------------------|
//! | `ALBUM_DB_PATH`   | `<temp dir>/albums.sqlite3`    |
//! | `ALBUM_LOG_LEVEL` | [`default_log_level`]          |
//! | `ALBUM_LOG_DIR`   | unset (file logging disabled)  |

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "ALBUM_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ALBUM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ALBUM_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "albums.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue(&'static str, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue(key, message) => write!(f, "invalid value for {key}: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumConfig {
    pub db_path: PathBuf,
    /// Normalized lowercase level name.
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl AlbumConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let db_path = match non_blank(&env_map, ENV_DB_PATH) {
            Some(value) => PathBuf::from(value),
            None => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        };

        let log_level = non_blank(&env_map, ENV_LOG_LEVEL).unwrap_or(default_log_level());
        let log_level = normalize_level(log_level)
            .map_err(|message| ConfigError::InvalidValue(ENV_LOG_LEVEL, message))?
            .as_str()
            .to_ascii_lowercase();

        let log_dir = non_blank(&env_map, ENV_LOG_DIR)
            .map(|value| normalize_log_dir(Path::new(value)))
            .transpose()
            .map_err(|message| ConfigError::InvalidValue(ENV_LOG_DIR, message))?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

fn non_blank<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
