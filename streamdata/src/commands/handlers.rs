use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    if event.is_interrupt() {
        return Some(AppCommand::Quit);
    }
    let key = event.key;

    // Priority 1: Alert popup blocks everything else
    if state.alert.is_some() {
        return match key {
            Key::Enter | Key::Esc => Some(AppCommand::DismissAlert),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 2: Help popup takes precedence over screen-specific Esc handling
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, state.current_screen(), key) {
            ('g', _, Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            ('g', Screen::Logs(..), Key::Char('g')) => Some(AppCommand::ScrollLogsToTop),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Sign-in screen
        (Screen::SignIn, Key::Enter) if !state.is_busy() => Some(AppCommand::SignIn),
        (Screen::SignIn, Key::Esc) if state.session.is_logging_in => {
            Some(AppCommand::CancelSignIn)
        }

        // Profile screen
        (Screen::Profile, Key::Char('s')) if !state.is_busy() => Some(AppCommand::SignOut),

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Char('G')) => Some(AppCommand::ScrollLogsToBottom),
        (Screen::Logs(..), Key::Esc | Key::Left | Key::Char('h')) => {
            Some(AppCommand::NavigateBack)
        }

        _ => None,
    }
}
