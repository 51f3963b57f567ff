use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;
use streamdata_auth::{Alert, SessionSnapshot, User};

/// Mock handler for tests (no session tasks)
///
/// Applies UI commands synchronously and records every command so tests can
/// assert that a session operation was requested.
#[derive(Default)]
pub struct MockDataHandler {
    pub executed: Vec<AppCommand>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        self.executed.push(command.clone());
        executor::execute_command_sync(command, state);
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Inject a session event (simulate the auth session publishing)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Replay the events a session publishes for a successful sign-in
    pub fn simulate_sign_in(&mut self, user: User) {
        self.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
            is_logging_in: true,
            ..Default::default()
        }));
        self.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
            user: Some(user),
            ..Default::default()
        }));
    }

    /// Replay the events a session publishes for a failed sign-in
    pub fn simulate_failed_sign_in(&mut self, alert: Alert) {
        self.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
            is_logging_in: true,
            ..Default::default()
        }));
        self.send_data_event(DataEvent::SessionChanged(SessionSnapshot::default()));
        self.send_data_event(DataEvent::Alert(alert));
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Commands executed so far, including skipped session commands
    pub fn executed(&self) -> &[AppCommand] {
        &self.core.handler().executed
    }

    /// Assert the current screen type by discriminant
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
