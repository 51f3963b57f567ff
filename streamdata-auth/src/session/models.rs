use helix_api::endpoints::users::User;

pub(crate) const SIGN_IN_ALERT_TITLE: &str = "Attention";
pub(crate) const SIGN_IN_ALERT_MESSAGE: &str = "Could not connect your Twitch account.";
pub(crate) const SIGN_OUT_ALERT_TITLE: &str = "Sign-out error";
pub(crate) const SIGN_OUT_ALERT_MESSAGE: &str = "An error occurred while signing out of the app.";

/// Point-in-time view of the session handed to observers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_logging_in: bool,
    pub is_logging_out: bool,
}

impl SessionSnapshot {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// User-facing failure notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub(crate) fn sign_in_failed() -> Self {
        Self::new(SIGN_IN_ALERT_TITLE, SIGN_IN_ALERT_MESSAGE)
    }

    pub(crate) fn sign_out_failed() -> Self {
        Self::new(SIGN_OUT_ALERT_TITLE, SIGN_OUT_ALERT_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Published once after every state transition
    StateChanged(SessionSnapshot),
    Alert(Alert),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn,
    /// The user cancelled or refused the authorization
    Declined,
    /// Reported to observers through an [`Alert`]
    Failed,
    /// Another sign-in or sign-out is in flight
    Busy,
    AlreadySignedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutOutcome {
    SignedOut,
    /// Local state was cleared but the provider did not confirm revocation
    RevocationFailed,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    LoggingIn,
    LoggingOut,
}
