use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid egg preset '{0}': {1}")]
    InvalidPreset(String, String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Preset parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
