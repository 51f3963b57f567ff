pub mod logs_screen;
pub mod profile_screen;
pub mod sign_in_screen;

use crate::state::LogsState;

#[derive(Debug, Clone)]
pub enum Screen {
    /// Root screen while signed out
    SignIn,
    /// Root screen while a user is signed in
    Profile,
    Logs(LogsState),
}
