use oauth2::{basic::BasicClient, AuthUrl, ClientId, RedirectUrl, Scope};
use url::Url;

use crate::config::Settings;
use crate::error::AuthError;
use crate::state::StateNonce;

pub const TWITCH_AUTH_URL: &str = "https://id.twitch.tv/oauth2/authorize";

/// Builds implicit-grant authorization URLs for the configured application
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client_id: String,
    auth_url: AuthUrl,
    redirect_url: RedirectUrl,
    scopes: Vec<Scope>,
    force_verify: bool,
}

impl OAuthClient {
    pub fn new(settings: &Settings) -> Result<Self, AuthError> {
        Self::with_auth_url(settings, TWITCH_AUTH_URL)
    }

    pub fn with_auth_url(settings: &Settings, auth_url: &str) -> Result<Self, AuthError> {
        let auth_url = AuthUrl::new(auth_url.to_string())
            .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(settings.redirect_uri.clone())
            .map_err(|e| AuthError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        Ok(Self {
            client_id: settings.client_id.clone(),
            auth_url,
            redirect_url,
            scopes: settings
                .scopes()
                .map(|scope| Scope::new(scope.to_string()))
                .collect(),
            force_verify: settings.force_verify,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Build the authorization URL for one attempt.
    ///
    /// `response_type=token` asks for the access token directly in the redirect.
    pub fn build_authorization_url(&self, state: &StateNonce) -> Url {
        let csrf_token = state.to_csrf_token();
        let (auth_url, _) = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .authorize_url(|| csrf_token)
            .use_implicit_flow()
            .add_scopes(self.scopes.iter().cloned())
            .add_extra_param("force_verify", self.force_verify.to_string())
            .url();
        auth_url
    }
}
