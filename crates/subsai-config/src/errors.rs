use subsai_hwprof::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown config field `{0}`")]
    UnknownField(String),

    #[error("invalid default for `{key}`: {reason}")]
    InvalidDefault { key: String, reason: String },

    #[error("invalid value for `{key}`: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("subsai couldn't find any available models")]
    NoModelsAvailable,

    #[error(transparent)]
    Runtime(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
