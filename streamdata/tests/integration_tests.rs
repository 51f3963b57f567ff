use streamdata::events::{AppCommand, DataEvent};
use streamdata::input::{Key, KeyEvent};
use streamdata::state::LoadingState;
use streamdata::testing::TestApp;
use streamdata::ui::screens::Screen;
use streamdata_auth::{Alert, SessionSnapshot, User};

fn test_user() -> User {
    User {
        id: "141981764".to_string(),
        login: "twitchdev".to_string(),
        display_name: "TwitchDev".to_string(),
        email: Some("not-real@email.com".to_string()),
        profile_image_url: "https://static-cdn.jtvnw.net/user-default-pictures/profile.png"
            .to_string(),
        broadcaster_type: "partner".to_string(),
        description: "Supporting third-party developers".to_string(),
        created_at: None,
    }
}

fn signed_in_app() -> TestApp {
    let mut app = TestApp::new();
    app.simulate_sign_in(test_user());
    app
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    app.assert_not_quit();
    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_ctrl_c_quits_over_alert() {
    let mut app = TestApp::new();
    app.simulate_failed_sign_in(Alert::new("Attention", "Could not connect your Twitch account."));

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('c')));
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();
    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Enter is swallowed while help is open
    app.send_key(Key::Enter);
    assert!(!app.executed().contains(&AppCommand::SignIn));

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_starts_on_sign_in_screen() {
    let app = TestApp::new();

    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));
    assert!(!app.state().session.is_signed_in());
    assert_eq!(app.state().activity, LoadingState::NotStarted);
}

#[test]
fn test_enter_requests_sign_in() {
    let mut app = TestApp::new();

    app.send_key(Key::Enter);

    assert_eq!(app.executed(), &[AppCommand::SignIn]);
}

#[test]
fn test_sign_in_flow_reaches_profile() {
    let mut app = TestApp::new();
    app.send_key(Key::Enter);

    app.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
        is_logging_in: true,
        ..Default::default()
    }));
    assert!(app.state().activity.is_loading());

    // A second Enter while the browser flow runs is ignored
    app.send_key(Key::Enter);
    assert_eq!(app.executed(), &[AppCommand::SignIn]);

    // Esc cancels the pending flow
    app.send_key(Key::Esc);
    assert_eq!(app.executed().last(), Some(&AppCommand::CancelSignIn));

    app.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
        user: Some(test_user()),
        ..Default::default()
    }));

    app.assert_screen_type(std::mem::discriminant(&Screen::Profile));
    assert_eq!(app.state().activity, LoadingState::Loaded);
    assert_eq!(
        app.state().session.user.as_ref().map(|u| u.login.as_str()),
        Some("twitchdev")
    );
}

#[test]
fn test_sign_out_from_profile() {
    let mut app = signed_in_app();

    app.send_key(Key::Char('s'));
    assert_eq!(app.executed(), &[AppCommand::SignOut]);

    app.send_data_event(DataEvent::SessionChanged(SessionSnapshot {
        user: Some(test_user()),
        is_logging_out: true,
        ..Default::default()
    }));
    assert!(app.state().activity.is_loading());

    // Busy: a second sign-out is not requested
    app.send_key(Key::Char('s'));
    assert_eq!(app.executed(), &[AppCommand::SignOut]);

    app.send_data_event(DataEvent::SessionChanged(SessionSnapshot::default()));
    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));
    assert_eq!(app.state().activity, LoadingState::NotStarted);
}

#[test]
fn test_s_does_nothing_on_sign_in_screen() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('s'));

    assert!(app.executed().is_empty());
}

#[test]
fn test_failed_sign_in_shows_alert_until_dismissed() {
    let mut app = TestApp::new();
    app.simulate_failed_sign_in(Alert::new("Attention", "Could not connect your Twitch account."));

    let alert = app.state().alert.clone().expect("alert should be shown");
    assert_eq!(alert.title, "Attention");
    assert!(matches!(app.state().activity, LoadingState::Error(_)));
    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));

    // The alert blocks other input
    app.send_key(Key::Char('?'));
    assert!(!app.state().help_visible);

    app.send_key(Key::Enter);
    assert!(app.state().alert.is_none());
    assert_eq!(app.state().activity, LoadingState::NotStarted);
    assert_eq!(app.executed(), &[AppCommand::DismissAlert]);
}

#[test]
fn test_failed_sign_out_alerts_and_returns_to_sign_in() {
    let mut app = signed_in_app();

    app.send_data_event(DataEvent::SessionChanged(SessionSnapshot::default()));
    app.send_data_event(DataEvent::Alert(Alert::new(
        "Sign-out error",
        "An error occurred while signing out of the app.",
    )));

    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));
    assert!(app.state().alert.is_some());
}

#[test]
fn test_logs_navigation() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('g'), Key::Char('l')]);
    app.assert_screen_type(std::mem::discriminant(&Screen::Logs(Default::default())));
    assert_eq!(app.state().pending_key, None);

    // g l again does not stack another logs screen
    app.send_keys(&[Key::Char('g'), Key::Char('l')]);
    assert_eq!(app.state().history.len(), 2);

    app.send_key(Key::Char('h'));
    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));
}

#[test]
fn test_sign_in_while_on_logs_keeps_logs_on_top() {
    let mut app = TestApp::new();
    app.send_keys(&[Key::Char('g'), Key::Char('l')]);

    app.simulate_sign_in(test_user());
    app.assert_screen_type(std::mem::discriminant(&Screen::Logs(Default::default())));

    app.send_key(Key::Esc);
    app.assert_screen_type(std::mem::discriminant(&Screen::Profile));
}

#[test]
fn test_pending_key_cleared_by_other_key() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    app.send_key(Key::Char('x'));
    assert_eq!(app.state().pending_key, None);
    app.assert_screen_type(std::mem::discriminant(&Screen::SignIn));
}
