use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum HelixApiError {
    Helix(StatusCode, ErrorDetail),
    Http(reqwest::Error),
    InvalidHeader(String),
}

impl HelixApiError {
    /// Build an error from a non-2xx response, falling back to the raw body
    /// when it is not a Helix error document.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorDetail>(body).unwrap_or_else(|_| ErrorDetail {
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            status: status.as_u16(),
            message: body.to_string(),
        });
        HelixApiError::Helix(status, detail)
    }
}

impl From<reqwest::Error> for HelixApiError {
    fn from(value: reqwest::Error) -> Self {
        HelixApiError::Http(value)
    }
}

impl std::fmt::Display for HelixApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelixApiError::Http(e) => write!(f, "HTTP error: {}", e),
            HelixApiError::InvalidHeader(e) => write!(f, "Invalid header: {}", e),
            HelixApiError::Helix(status, detail) => {
                write!(f, "({}) {}: {}", status, detail.error, detail.message)
            }
        }
    }
}

impl std::error::Error for HelixApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HelixApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error: String,
    pub status: u16,
    #[serde(default)]
    pub message: String,
}
