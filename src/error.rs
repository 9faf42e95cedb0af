use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid API response: {0}")]
    ApiResponse(String),

    #[error("prompt error: {0}")]
    Prompt(String),

    #[error("template error: {0}")]
    Template(#[from] upon::Error),
}

impl Error {
    /// True when the API reported the requested model does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ApiStatus { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
