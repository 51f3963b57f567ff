use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::AuthError;

pub const TWITCH_REVOKE_URL: &str = "https://id.twitch.tv/oauth2/revoke";

/// Invalidates access tokens at the provider
pub struct RevocationClient {
    http_client: Client,
    endpoint: String,
}

impl RevocationClient {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, AuthError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn revoke(&self, client_id: &str, token: &SecretString) -> Result<(), AuthError> {
        self.http_client
            .post(&self.endpoint)
            .form(&[("client_id", client_id), ("token", token.expose_secret())])
            .send()
            .await?
            .error_for_status()?;

        tracing::info!("Access token revoked");
        Ok(())
    }
}
