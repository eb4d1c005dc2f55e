//! Loading of the JSON game configuration.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use starfighter_core::GameConfig;
use thiserror::Error;

/// Errors that can occur while loading the game configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file contents were not a valid configuration document.
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a configuration document previously read from `path`.
///
/// An empty spaceship roster is replaced by the built-in one; the rest of the
/// document is kept.
pub(crate) fn parse(path: &Path, contents: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig =
        serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if !config.spaceship_types().is_empty() {
        return Ok(config);
    }

    tracing::warn!(
        path = %path.display(),
        "config lists no spaceship types, using built-in roster"
    );
    Ok(GameConfig::new(
        config.obstacle_health_modifier(),
        GameConfig::default().spaceship_types().to_vec(),
    ))
}

/// Reads and parses the configuration stored at `path`.
pub(crate) fn load(path: &Path) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &contents)
}

/// Loads the configuration, falling back to the built-in defaults on any failure.
pub(crate) fn load_or_default(path: &Path) -> GameConfig {
    match load(path) {
        Ok(config) => {
            tracing::debug!(
                path = %path.display(),
                spaceships = config.spaceship_types().len(),
                "loaded configuration"
            );
            config
        }
        Err(error) => {
            tracing::warn!(error = ?anyhow::Error::from(error), "could not load configuration");
            tracing::info!("using default configuration");
            GameConfig::default()
        }
    }
}
