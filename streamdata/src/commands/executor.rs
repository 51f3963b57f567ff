use crate::background::{BackgroundTaskManager, Session};
use crate::events::AppCommand;
use crate::state::*;
use crate::ui::screens::Screen;

const SIGN_IN_TASK: &str = "sign_in";
const SIGN_OUT_TASK: &str = "sign_out";
const LOG_PAGE_SIZE: usize = 20;

/// Execute a command by spawning session tasks or updating UI state
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    session: &Session,
) {
    match command {
        AppCommand::SignIn => {
            let session = session.clone();
            task_manager.spawn_task(SIGN_IN_TASK, async move {
                let outcome = session.sign_in().await;
                tracing::debug!(?outcome, "Sign-in task finished");
            });
            state.pending_key = None;
        }

        AppCommand::SignOut => {
            let session = session.clone();
            task_manager.spawn_task(SIGN_OUT_TASK, async move {
                let outcome = session.sign_out().await;
                tracing::debug!(?outcome, "Sign-out task finished");
            });
            state.pending_key = None;
        }

        AppCommand::CancelSignIn => {
            if !session.launcher().cancel() {
                tracing::debug!("No authorization flow to cancel");
            }
            state.pending_key = None;
        }

        command => execute_command_sync(command, state),
    }
}

/// Apply a command that only touches UI state.
///
/// Session commands are skipped; tests inject the matching DataEvents instead.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        AppCommand::DismissAlert => {
            state.alert = None;
            if matches!(state.activity, LoadingState::Error(_)) {
                state.activity = LoadingState::NotStarted;
            }
        }

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToLogs => {
            // No logging here to avoid feeding the log screen
            if !matches!(state.current_screen(), Screen::Logs(_)) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
        }

        // Scrolling back in time increases the offset from the newest entry
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset =
                    (s.scroll_offset + LOG_PAGE_SIZE).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
        }

        AppCommand::SignIn | AppCommand::SignOut | AppCommand::CancelSignIn => {}
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}
