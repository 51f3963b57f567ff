pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use components::{alert_popup, help_popup};
use ratatui::Frame;
use screens::*;

/// Draws the current screen, then any popups over it. Never mutates state.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    match state.current_screen() {
        Screen::SignIn => sign_in_screen::render(f, state),
        Screen::Profile => profile_screen::render(f, state),
        Screen::Logs(logs_state) => logs_screen::render(f, logs_state, log_buffer),
    }

    if state.help_visible {
        help_popup::render_help_popup(f, state);
    }

    // Alerts go on top of everything, including help
    if let Some(alert) = &state.alert {
        alert_popup::render_alert_popup(f, alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DataEvent;
    use crate::state::reducer::reduce_data_event;
    use ratatui::{backend::TestBackend, Terminal};
    use streamdata_auth::{Alert, SessionSnapshot, User};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let log_buffer = LogBuffer::new(10);
        terminal
            .draw(|f| render_app(f, state, &log_buffer))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn user() -> User {
        User {
            id: "42".to_string(),
            login: "foo".to_string(),
            display_name: "Foo".to_string(),
            email: Some("f@x.com".to_string()),
            profile_image_url: String::new(),
            broadcaster_type: String::new(),
            description: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_sign_in_button_label_follows_session() {
        let mut state = AppState::new();
        let screen = draw(&state);
        assert!(screen.contains(sign_in_screen::SIGN_IN_LABEL));
        assert!(!screen.contains(sign_in_screen::SIGNING_IN_LABEL));

        reduce_data_event(
            &mut state,
            DataEvent::SessionChanged(SessionSnapshot {
                is_logging_in: true,
                ..Default::default()
            }),
        );
        let screen = draw(&state);
        assert!(screen.contains(sign_in_screen::SIGNING_IN_LABEL));
        assert!(!screen.contains(sign_in_screen::SIGN_IN_LABEL));
    }

    #[test]
    fn test_profile_screen_shows_user() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::SessionChanged(SessionSnapshot {
                user: Some(user()),
                ..Default::default()
            }),
        );

        let screen = draw(&state);
        assert!(screen.contains("Signed in as Foo"));
        assert!(screen.contains("f@x.com"));
    }

    #[test]
    fn test_alert_is_drawn_over_screen() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::Alert(Alert::new("Attention", "Could not connect")),
        );

        let screen = draw(&state);
        assert!(screen.contains("Attention"));
        assert!(screen.contains("Could not connect"));
    }
}
