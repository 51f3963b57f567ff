#[cfg(feature = "browser")]
mod browser;
#[cfg(feature = "browser")]
mod pages;

#[cfg(feature = "browser")]
pub use browser::BrowserLauncher;

use secrecy::SecretString;
use std::collections::HashMap;
use std::future::Future;
use url::Url;

/// Error code the provider returns when the user refuses the authorization
pub const ACCESS_DENIED: &str = "access_denied";

/// How an external authorization flow ended
#[derive(Debug)]
pub enum AuthorizationOutcome {
    Success {
        access_token: SecretString,
        state: String,
    },
    Denied {
        description: Option<String>,
    },
    Cancelled,
    Error(String),
}

impl AuthorizationOutcome {
    /// Classify the parameters the provider appended to the redirect URI.
    ///
    /// For the implicit grant these arrive in the URL fragment on success and in
    /// the query string on error.
    pub fn from_redirect(params: &HashMap<String, String>) -> Self {
        if let Some(error) = params.get("error") {
            let description = params.get("error_description").cloned();
            if error == ACCESS_DENIED {
                return Self::Denied { description };
            }
            return Self::Error(match description {
                Some(description) => format!("{}: {}", error, description),
                None => error.clone(),
            });
        }

        match (params.get("access_token"), params.get("state")) {
            (Some(access_token), Some(state)) if !access_token.is_empty() => Self::Success {
                access_token: SecretString::from(access_token.clone()),
                state: state.clone(),
            },
            (_, Some(_)) => Self::Error("Redirect did not include an access token".to_string()),
            _ => Self::Error("Redirect did not include a state value".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Runs the user-facing part of an authorization flow.
///
/// Implementations take the user to `url`, suspend until the provider redirects
/// back (or the user gives up), and report what happened.
pub trait AuthorizationLauncher: Send + Sync + 'static {
    fn authorize(&self, url: &Url) -> impl Future<Output = AuthorizationOutcome> + Send;
}
