use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(String),

    #[error("Invalid YAML: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid signature pattern '{name}': {detail}")]
    InvalidSignaturePattern { name: String, detail: String },
}
