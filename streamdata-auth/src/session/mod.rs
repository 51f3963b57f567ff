mod models;

pub use models::{Alert, SessionEvent, SessionSnapshot, SignInOutcome, SignOutOutcome};

use helix_api::endpoints::users::User;
use helix_api::Request;
use models::Phase;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::config::Settings;
use crate::error::AuthError;
use crate::launcher::{AuthorizationLauncher, AuthorizationOutcome};
use crate::oauth_client::{OAuthClient, TWITCH_AUTH_URL};
use crate::revocation::{RevocationClient, TWITCH_REVOKE_URL};
use crate::state::StateNonce;

const EVENT_CAPACITY: usize = 64;

#[derive(Default)]
struct SessionState {
    user: Option<User>,
    access_token: Option<SecretString>,
    phase: Phase,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_logging_in: self.phase == Phase::LoggingIn,
            is_logging_out: self.phase == Phase::LoggingOut,
        }
    }
}

struct Inner<L> {
    oauth: OAuthClient,
    api: helix_api::Client,
    revocation: RevocationClient,
    launcher: L,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl<L> Inner<L> {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Called with the state lock held so observers see transitions in order
    fn publish(&self, state: &SessionState) {
        let _ = self
            .events
            .send(SessionEvent::StateChanged(state.snapshot()));
    }

    fn alert(&self, alert: Alert) {
        let _ = self.events.send(SessionEvent::Alert(alert));
    }
}

/// The signed-in Twitch identity and the operations that change it.
///
/// Cloning is cheap and every clone drives the same session. The user and the
/// access token are always committed and cleared together.
pub struct AuthSession<L> {
    inner: Arc<Inner<L>>,
}

impl<L> Clone for AuthSession<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub struct AuthSessionBuilder {
    settings: Settings,
    api_base_url: Option<String>,
    auth_url: String,
    revoke_url: String,
}

impl AuthSessionBuilder {
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn revoke_url(mut self, url: impl Into<String>) -> Self {
        self.revoke_url = url.into();
        self
    }

    pub fn build<L: AuthorizationLauncher>(self, launcher: L) -> Result<AuthSession<L>, AuthError> {
        let oauth = OAuthClient::with_auth_url(&self.settings, &self.auth_url)?;
        let api = match self.api_base_url {
            Some(base_url) => helix_api::Client::with_base_url(&self.settings.client_id, base_url)?,
            None => helix_api::Client::new(&self.settings.client_id)?,
        };
        let revocation = RevocationClient::with_endpoint(self.revoke_url)?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(AuthSession {
            inner: Arc::new(Inner {
                oauth,
                api,
                revocation,
                launcher,
                state: Mutex::new(SessionState::default()),
                events,
            }),
        })
    }
}

impl<L: AuthorizationLauncher> AuthSession<L> {
    pub fn new(settings: Settings, launcher: L) -> Result<Self, AuthError> {
        Self::builder(settings).build(launcher)
    }

    pub fn builder(settings: Settings) -> AuthSessionBuilder {
        AuthSessionBuilder {
            settings,
            api_base_url: None,
            auth_url: TWITCH_AUTH_URL.to_string(),
            revoke_url: TWITCH_REVOKE_URL.to_string(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn has_access_token(&self) -> bool {
        self.inner.lock().access_token.is_some()
    }

    pub fn launcher(&self) -> &L {
        &self.inner.launcher
    }

    /// The shared API client, authenticated while a user is signed in
    pub fn api(&self) -> &helix_api::Client {
        &self.inner.api
    }

    /// Run the authorization flow and load the user's profile.
    ///
    /// Failures are logged and published as an [`Alert`]; the session is left
    /// signed out.
    pub async fn sign_in(&self) -> SignInOutcome {
        {
            let mut state = self.inner.lock();
            if state.phase != Phase::Idle {
                tracing::warn!(phase = ?state.phase, "Ignoring sign-in while another flow is running");
                return SignInOutcome::Busy;
            }
            if state.user.is_some() {
                tracing::debug!("Sign-in requested while already signed in");
                return SignInOutcome::AlreadySignedIn;
            }
            state.phase = Phase::LoggingIn;
            self.inner.publish(&state);
        }

        let result = self.authenticate().await;

        let (outcome, alert) = {
            let mut state = self.inner.lock();
            let (outcome, alert) = match result {
                Ok(Some((user, access_token))) => {
                    tracing::info!(user_id = %user.id, login = %user.login, "Signed in");
                    state.user = Some(user);
                    state.access_token = Some(access_token);
                    (SignInOutcome::SignedIn, None)
                }
                Ok(None) => (SignInOutcome::Declined, None),
                Err(e) => {
                    tracing::error!("Sign-in failed: {}", e);
                    self.inner.api.clear_bearer_token();
                    (SignInOutcome::Failed, Some(Alert::sign_in_failed()))
                }
            };
            state.phase = Phase::Idle;
            self.inner.publish(&state);
            (outcome, alert)
        };

        if let Some(alert) = alert {
            self.inner.alert(alert);
        }
        outcome
    }

    /// Ok(None) when the user declined or cancelled
    async fn authenticate(&self) -> Result<Option<(User, SecretString)>, AuthError> {
        let nonce = StateNonce::generate();
        let url = self.inner.oauth.build_authorization_url(&nonce);
        tracing::info!("Starting Twitch authorization");

        match self.inner.launcher.authorize(&url).await {
            AuthorizationOutcome::Success {
                access_token,
                state,
            } => {
                if !nonce.matches(&state) {
                    return Err(AuthError::InvalidState);
                }

                self.inner
                    .api
                    .set_bearer_token(SecretString::from(access_token.expose_secret()));

                let user = self
                    .inner
                    .api
                    .send(Request::users().current())
                    .await?
                    .into_first()
                    .ok_or(AuthError::EmptyProfile)?;

                Ok(Some((user, access_token)))
            }
            AuthorizationOutcome::Denied { description } => {
                tracing::info!(
                    description = description.as_deref().unwrap_or_default(),
                    "Authorization denied by user"
                );
                Ok(None)
            }
            AuthorizationOutcome::Cancelled => {
                tracing::info!("Authorization cancelled");
                Ok(None)
            }
            AuthorizationOutcome::Error(message) => Err(AuthError::Authorization(message)),
        }
    }

    /// Revoke the current token and forget the user.
    ///
    /// Local state is cleared even when revocation fails.
    pub async fn sign_out(&self) -> SignOutOutcome {
        let token = {
            let mut state = self.inner.lock();
            if state.phase != Phase::Idle {
                tracing::warn!(phase = ?state.phase, "Ignoring sign-out while another flow is running");
                return SignOutOutcome::Busy;
            }
            state.phase = Phase::LoggingOut;
            self.inner.publish(&state);
            state
                .access_token
                .as_ref()
                .map(|token| SecretString::from(token.expose_secret()))
        };

        let result = match token {
            Some(token) => {
                self.inner
                    .revocation
                    .revoke(self.inner.oauth.client_id(), &token)
                    .await
            }
            None => {
                tracing::debug!("No access token held, skipping revocation");
                Ok(())
            }
        };

        {
            let mut state = self.inner.lock();
            state.user = None;
            state.access_token = None;
            self.inner.api.clear_bearer_token();
            state.phase = Phase::Idle;
            self.inner.publish(&state);
        }
        tracing::info!("Signed out");

        match result {
            Ok(()) => SignOutOutcome::SignedOut,
            Err(e) => {
                tracing::error!("Sign-out failed: {}", e);
                self.inner.alert(Alert::sign_out_failed());
                SignOutOutcome::RevocationFailed
            }
        }
    }
}
