//! Configuration loading and dataset path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the dataset location
pub const DATA_FILE_ENV: &str = "CLINIDASH_DATA_FILE";

/// Generic port variable honoured after `--port`/`CLINIDASH_PORT`
pub const PORT_ENV: &str = "PORT";

/// Dataset location used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "db/DataSet.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Optional settings read from `config.toml`
///
/// Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub data_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Load the explicitly requested file, or the platform default file when
    /// it exists. `Ok(None)` means there was nothing to load.
    pub fn load_optional(explicit: Option<&Path>) -> Result<Option<Self>> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(None),
            },
        };
        Self::load(&path).map(Some)
    }
}

/// Platform config file location (`~/.config/clinidash/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("clinidash").join("config.toml"))
}

/// Dataset path resolution, in priority order:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default
pub fn resolve_data_file(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.data_file {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DATA_FILE)
}

/// Port from `env_var_name`, ignoring unset, blank or unparseable values
pub fn port_from_env(env_var_name: &str) -> Option<u16> {
    let raw = std::env::var(env_var_name).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid port", env_var_name, raw);
            None
        }
    }
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge command-line values (already folded with their env vars by the
    /// caller) over the TOML config and compiled defaults. The port also
    /// honours [`PORT_ENV`] between the command line and the TOML file.
    pub fn resolve(
        data_file: Option<&Path>,
        host: Option<String>,
        port: Option<u16>,
        toml_config: TomlConfig,
    ) -> Self {
        Self {
            data_file: resolve_data_file(data_file, DATA_FILE_ENV, &toml_config),
            host: host
                .or(toml_config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port
                .or_else(|| port_from_env(PORT_ENV))
                .or(toml_config.port)
                .unwrap_or(DEFAULT_PORT),
            log_level: toml_config
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}
