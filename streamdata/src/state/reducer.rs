use super::{AppState, LoadingState};
use crate::events::DataEvent;
use throbber_widgets_tui::ThrobberState;

/// Pure state transition function for session events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::SessionChanged(snapshot) => {
            let busy = snapshot.is_logging_in || snapshot.is_logging_out;
            let was_busy = state.is_busy();

            if busy {
                // Keep the running throbber so the animation does not restart
                if !state.activity.is_loading() {
                    state.activity = LoadingState::Loading(ThrobberState::default());
                }
            } else if was_busy {
                state.activity = if snapshot.is_signed_in() {
                    LoadingState::Loaded
                } else {
                    LoadingState::NotStarted
                };
            }

            state.session = snapshot;
            state.sync_root_screen();
        }

        DataEvent::Alert(alert) => {
            tracing::debug!(title = %alert.title, "Showing alert");
            state.activity = LoadingState::Error(alert.message.clone());
            state.alert = Some(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::Screen;
    use streamdata_auth::{Alert, SessionSnapshot, User};

    fn user() -> User {
        User {
            id: "1".to_string(),
            login: "foo".to_string(),
            display_name: "foo".to_string(),
            email: Some("f@x.com".to_string()),
            profile_image_url: "http://example.com/foo.png".to_string(),
            broadcaster_type: String::new(),
            description: String::new(),
            created_at: None,
        }
    }

    fn logging_in() -> SessionSnapshot {
        SessionSnapshot {
            is_logging_in: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_logging_in_starts_throbber() {
        let mut state = AppState::new();
        reduce_data_event(&mut state, DataEvent::SessionChanged(logging_in()));

        assert!(state.session.is_logging_in);
        assert!(state.activity.is_loading());
        assert!(state.loading_state().is_some());
    }

    #[test]
    fn test_signed_in_switches_to_profile() {
        let mut state = AppState::new();
        reduce_data_event(&mut state, DataEvent::SessionChanged(logging_in()));
        reduce_data_event(
            &mut state,
            DataEvent::SessionChanged(SessionSnapshot {
                user: Some(user()),
                ..Default::default()
            }),
        );

        assert!(matches!(state.current_screen(), Screen::Profile));
        assert_eq!(state.activity, LoadingState::Loaded);
    }

    #[test]
    fn test_signed_out_returns_to_sign_in_under_logs() {
        let mut state = AppState::new();
        state.session.user = Some(user());
        state.sync_root_screen();
        state.navigate_to(Screen::Logs(Default::default()));

        reduce_data_event(
            &mut state,
            DataEvent::SessionChanged(SessionSnapshot::default()),
        );

        assert!(matches!(state.history[0], Screen::SignIn));
        assert!(matches!(state.current_screen(), Screen::Logs(_)));
    }

    #[test]
    fn test_alert_is_stored_and_marks_error() {
        let mut state = AppState::new();
        reduce_data_event(&mut state, DataEvent::SessionChanged(logging_in()));
        reduce_data_event(
            &mut state,
            DataEvent::SessionChanged(SessionSnapshot::default()),
        );
        reduce_data_event(
            &mut state,
            DataEvent::Alert(Alert::new(
                "Attention",
                "Could not connect your Twitch account.",
            )),
        );

        assert_eq!(
            state.alert.as_ref().map(|a| a.title.as_str()),
            Some("Attention")
        );
        assert!(matches!(state.activity, LoadingState::Error(_)));
        assert!(matches!(state.current_screen(), Screen::SignIn));
    }
}
