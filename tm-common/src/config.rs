//! Configuration loading
//!
//! Every field resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Arguments and environment are merged by the binary (clap) and handed in
//! as [`ConfigOverrides`]; this module layers them over the TOML file and
//! the defaults and produces one [`AppConfig`] that is passed explicitly to
//! the store and the metadata client.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://topmovies.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const TMDB_SEARCH_URL: &str = "https://api.themoviedb.org/3/search/movie";
pub const TMDB_DETAILS_URL: &str = "https://api.themoviedb.org/3/movie/";
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Contents of the optional TOML configuration file
///
/// All fields are optional; anything missing falls through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// SQLite connection string, e.g. `sqlite://movies.db`
    #[serde(default)]
    pub database_url: Option<String>,

    /// HTTP listen address
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Movie metadata provider settings
    #[serde(default)]
    pub tmdb: TmdbSection,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[tmdb]` table of the TOML file
#[derive(Clone, Default, Deserialize)]
pub struct TmdbSection {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub search_url: Option<String>,
    #[serde(default)]
    pub details_url: Option<String>,
    #[serde(default)]
    pub image_base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for TmdbSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbSection")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("search_url", &self.search_url)
            .field("details_url", &self.details_url)
            .field("image_base_url", &self.image_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub bind_addr: Option<String>,
    pub tmdb_token: Option<String>,
    pub log_level: Option<String>,
}

/// Metadata provider configuration handed to the client constructor
#[derive(Clone)]
pub struct TmdbConfig {
    /// Bearer token, without the `Bearer ` prefix
    pub token: String,
    pub search_url: String,
    pub details_url: String,
    pub image_base_url: String,
    /// `None` means requests never time out
    pub timeout: Option<Duration>,
}

impl TmdbConfig {
    /// Config pointing at the public endpoints with the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            search_url: TMDB_SEARCH_URL.to_string(),
            details_url: TMDB_DETAILS_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("token", &"<redacted>")
            .field("search_url", &self.search_url)
            .field("details_url", &self.details_url)
            .field("image_base_url", &self.image_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub tmdb: TmdbConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Layer overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let raw_token = overrides
            .tmdb_token
            .or(file.tmdb.token)
            .ok_or_else(|| {
                Error::Config(
                    "TMDB API token not configured. Set TM_TMDB_TOKEN, pass --tmdb-token, \
                     or add `token` under [tmdb] in the config file"
                        .to_string(),
                )
            })?;
        let token = normalize_token(&raw_token)?;

        let level = overrides.log_level.unwrap_or(file.logging.level);

        Ok(Self {
            database_url: overrides
                .database_url
                .or(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: overrides
                .bind_addr
                .or(file.bind_addr)
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            tmdb: TmdbConfig {
                token,
                search_url: file
                    .tmdb
                    .search_url
                    .unwrap_or_else(|| TMDB_SEARCH_URL.to_string()),
                details_url: file
                    .tmdb
                    .details_url
                    .unwrap_or_else(|| TMDB_DETAILS_URL.to_string()),
                image_base_url: file
                    .tmdb
                    .image_base_url
                    .unwrap_or_else(|| TMDB_IMAGE_BASE_URL.to_string()),
                timeout: file.tmdb.timeout_secs.map(Duration::from_secs),
            },
            logging: LoggingConfig { level },
        })
    }
}

const BEARER: &str = "Bearer";

/// Strip an optional `Bearer ` prefix and surrounding whitespace
pub fn normalize_token(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let token = match trimmed.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => {
            let rest = &trimmed[BEARER.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim()
            } else {
                trimmed
            }
        }
        _ => trimmed,
    };

    if token.is_empty() {
        return Err(Error::Config("TMDB API token is empty".to_string()));
    }

    Ok(token.to_string())
}

/// Default TOML location: `<config dir>/topmovies/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("topmovies").join("config.toml"))
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. Without one, the default
/// location is tried and silently skipped when absent.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using environment and defaults");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Parse TOML text into a [`TomlConfig`]
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}
