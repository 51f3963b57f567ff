pub mod reducer;

use crate::ui::screens::Screen;
use streamdata_auth::{Alert, SessionSnapshot};
use throbber_widgets_tui::ThrobberState;

/// Progress of the session operation in flight
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub struct AppState {
    pub history: Vec<Screen>,

    /// Latest session view received from the auth session
    pub session: SessionSnapshot,
    pub activity: LoadingState,
    pub alert: Option<Alert>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::SignIn],

            session: SessionSnapshot::default(),
            activity: LoadingState::NotStarted,
            alert: None,

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history.last().unwrap_or(&Screen::SignIn)
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        if self.history.is_empty() {
            self.history.push(Screen::SignIn);
        }
        let last = self.history.len() - 1;
        &mut self.history[last]
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Point the bottom of the navigation stack at the screen matching the session
    pub fn sync_root_screen(&mut self) {
        let root = if self.session.is_signed_in() {
            Screen::Profile
        } else {
            Screen::SignIn
        };
        match self.history.first_mut() {
            Some(first) if std::mem::discriminant(first) != std::mem::discriminant(&root) => {
                tracing::debug!(?root, "Switching root screen");
                *first = root;
            }
            Some(_) => {}
            None => self.history.push(root),
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.activity {
            LoadingState::Loading(ref mut throbber_state) => Some(throbber_state),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_logging_in || self.session.is_logging_out
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
