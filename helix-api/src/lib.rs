pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod request;

pub use crate::error::{ErrorDetail, HelixApiError};
pub use crate::request::{ApiRequest, RequestData};
use repositories::*;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

const BASE_URL: &str = "https://api.twitch.tv/helix";
const CLIENT_ID_HEADER: &str = "Client-Id";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared Helix client.
///
/// The `Client-Id` header is fixed when the client is built. The bearer token is
/// attached and removed at runtime as the user signs in and out, so a single
/// client can be shared for the lifetime of the application.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<SecretString>>,
}

impl Client {
    pub fn new(client_id: &str) -> Result<Self, HelixApiError> {
        Self::with_base_url(client_id, BASE_URL)
    }

    pub fn with_base_url(
        client_id: &str,
        base_url: impl Into<String>,
    ) -> Result<Self, HelixApiError> {
        let client_id = HeaderValue::from_str(client_id)
            .map_err(|e| HelixApiError::InvalidHeader(format!("{}: {}", CLIENT_ID_HEADER, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ID_HEADER, client_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
        })
    }

    /// Attach `Authorization: Bearer <token>` to every subsequent request
    pub fn set_bearer_token(&self, token: SecretString) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        tracing::debug!("Bearer token attached to API client");
    }

    /// Stop sending the Authorization header
    pub fn clear_bearer_token(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Bearer token removed from API client");
    }

    pub fn has_bearer_token(&self) -> bool {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn authorization(&self) -> Result<Option<HeaderValue>, HelixApiError> {
        let guard = self.bearer.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|e| HelixApiError::InvalidHeader(format!("Authorization: {}", e)))?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, HelixApiError>
    where
        R: ApiRequest,
    {
        let method = R::METHOD;
        let url = format!("{}{}", self.base_url, request.endpoint());
        let mut builder = self.http.request(method.clone(), &url);

        builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(data) => builder.query(data),
        };

        if let Some(authorization) = self.authorization()? {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        tracing::debug!(method = %method, url = %url, "Sending Helix request");

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(HelixApiError::from_response(status, &body));
        }

        Ok(response.json::<R::Response>().await?)
    }
}

pub struct Request;

impl Request {
    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
