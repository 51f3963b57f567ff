use streamdata_auth::{Alert, SessionEvent, SessionSnapshot};

/// Commands to execute (user actions → session operations or UI changes)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Session
    SignIn,
    SignOut,
    CancelSignIn,

    // Alerts
    DismissAlert,

    // Navigation
    NavigateBack,
    NavigateToLogs,

    // Log screen
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    ToggleHelp,

    // System
    Quit,
}

/// Events published by the auth session
#[derive(Debug, Clone)]
pub enum DataEvent {
    SessionChanged(SessionSnapshot),
    Alert(Alert),
}

impl From<SessionEvent> for DataEvent {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::StateChanged(snapshot) => DataEvent::SessionChanged(snapshot),
            SessionEvent::Alert(alert) => DataEvent::Alert(alert),
        }
    }
}
