use std::path::Path;

use crate::error::ConfigError;
use crate::game::GRID_SIZE;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub cols: usize,
    /// Seed for the tile-placement RNG; omit for a fresh game each run.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: GRID_SIZE,
            cols: GRID_SIZE,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < 2 {
            return Err(ConfigError::Validation("board.rows must be >= 2".into()));
        }
        if self.board.cols < 2 {
            return Err(ConfigError::Validation("board.cols must be >= 2".into()));
        }
        Ok(())
    }
}
