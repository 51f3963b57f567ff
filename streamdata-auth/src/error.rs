use helix_api::HelixApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid state value")]
    InvalidState,

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Profile response contained no user")]
    EmptyProfile,

    #[error("API error: {0}")]
    Api(#[from] HelixApiError),

    #[error("Token revocation failed: {0}")]
    Revocation(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
