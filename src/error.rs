use std::path::PathBuf;

/// Errors that can occur when loading configuration.
///
/// Model preconditions (placing a tile on a full board, merging unequal
/// tiles) are programmer errors and assert instead of returning these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
