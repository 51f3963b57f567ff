//! Twitch sign-in for streamdata.
//!
//! [`AuthSession`] runs the OAuth2 implicit grant through an
//! [`AuthorizationLauncher`], validates the returned `state`, loads the user's
//! profile from Helix and keeps the result in memory until sign-out.

mod config;
mod error;
pub mod launcher;
mod oauth_client;
mod revocation;
mod session;
mod state;

pub use config::Settings;
pub use error::AuthError;
#[cfg(feature = "browser")]
pub use launcher::BrowserLauncher;
pub use launcher::{AuthorizationLauncher, AuthorizationOutcome};
pub use oauth_client::{OAuthClient, TWITCH_AUTH_URL};
pub use revocation::{RevocationClient, TWITCH_REVOKE_URL};
pub use session::{
    Alert, AuthSession, AuthSessionBuilder, SessionEvent, SessionSnapshot, SignInOutcome,
    SignOutOutcome,
};
pub use state::StateNonce;

pub use helix_api::endpoints::users::User;
