//! `lp.toml` loading. Precedence: built-in defaults, then the file, then
//! `LP_*` environment variables.

use serde::Deserialize;
use std::fs;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "lp.toml";
pub const DEFAULT_PORT: u16 = 4830;
pub const DEFAULT_DB_PATH: &str = ".lp/progress.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    /// Applies `LP_HOST`, `LP_PORT`, `LP_DB_PATH` and `LP_LOG`. Unusable
    /// values are skipped and reported back as warnings.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(value) = lookup("LP_HOST") {
            match value.trim().parse::<IpAddr>() {
                Ok(host) => self.server.host = host,
                Err(_) => warnings.push(format!("ignoring LP_HOST={value:?}: not an IP address")),
            }
        }
        if let Some(value) = lookup("LP_PORT") {
            match value.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warnings.push(format!("ignoring LP_PORT={value:?}: not a port number")),
            }
        }
        if let Some(value) = lookup("LP_DB_PATH") {
            match non_blank(&value) {
                Some(path) => self.database.path = path,
                None => warnings.push("ignoring empty LP_DB_PATH".to_string()),
            }
        }
        if let Some(value) = lookup("LP_LOG") {
            match non_blank(&value) {
                Some(filter) => self.logging.filter = filter,
                None => warnings.push("ignoring empty LP_LOG".to_string()),
            }
        }
        warnings
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Loads the config file and overlays the environment.
///
/// An explicit `path` must exist; the default `lp.toml` is optional.
pub fn load(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(Config, Vec<String>), ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let mut config = match fs::read_to_string(&path) {
        Ok(content) => {
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            if required {
                return Err(ConfigError::Missing { path });
            }
            Config::default()
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let warnings = config.apply_env(lookup);
    Ok((config, warnings))
}
