//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Compiled default database file (relative to the working directory)
pub const DEFAULT_DATABASE: &str = "database.db";

/// Compiled default web server port
pub const DEFAULT_PORT: u16 = 8081;

/// Environment variable overriding the database path
pub const DATABASE_ENV_VAR: &str = "HOME_SOFTWARE_DATABASE";

/// Environment variable pointing at an explicit TOML config file
pub const CONFIG_ENV_VAR: &str = "HOME_SOFTWARE_CONFIG";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Path of the SQLite database file
    pub database: Option<PathBuf>,
    /// Port for `server`
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file if one can be found.
    ///
    /// A missing file yields the defaults. An unreadable or invalid file is
    /// logged and ignored; it never aborts startup.
    pub fn load_or_default() -> Self {
        let Some(path) = config_file_path() else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// Locate the config file.
///
/// `HOME_SOFTWARE_CONFIG` wins when set; otherwise
/// `<config dir>/home-software/config.toml` is used if it exists.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|d| d.join("home-software").join("config.toml"))
        .filter(|path| path.exists())
}

/// Database path resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (`database.db`)
pub fn resolve_database_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.database {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DATABASE)
}

/// Server port resolution: command line (or its env var), then config, then default
pub fn resolve_port(cli_arg: Option<u16>, config: &TomlConfig) -> u16 {
    cli_arg.or(config.port).unwrap_or(DEFAULT_PORT)
}
