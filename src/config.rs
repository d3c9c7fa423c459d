use std::{
    env, fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::site::SiteOptions;

const CONFIG_NAMESPACE: &str = "gemsite";
const CONFIG_FILENAME: &str = "gemsite.toml";

#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub options: SiteOptions,
    /// `None` when built-in defaults are used
    pub path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config file at {path:?}: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
        path: PathBuf,
    },
}

pub fn parse_config(text: &str) -> Result<SiteOptions, toml::de::Error> {
    toml::from_str(text)
}

pub fn load_config_file(path: &Path) -> Result<SiteOptions, ConfigError> {
    let config_text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    parse_config(&config_text).map_err(|source| ConfigError::Parse {
        source,
        path: path.to_path_buf(),
    })
}

/// Load options from `explicit` when given, otherwise from the user config
/// file if one exists, otherwise fall back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match resolve_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no config file found, using defaults");
                return Ok(ConfigLoadResult {
                    options: SiteOptions::default(),
                    path: None,
                });
            }
        },
    };

    let options = load_config_file(&path)?;
    log::debug!("loaded config from {}", path.display());
    Ok(ConfigLoadResult {
        options,
        path: Some(path),
    })
}

pub fn resolve_config_path() -> Option<PathBuf> {
    Some(
        config_home_dir()?
            .join(CONFIG_NAMESPACE)
            .join(CONFIG_FILENAME),
    )
}

fn config_home_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir));
    }

    #[cfg(windows)]
    if let Some(dir) = env::var_os("APPDATA") {
        return Some(PathBuf::from(dir));
    }

    if let Some(home) = env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config"));
    }

    None
}
