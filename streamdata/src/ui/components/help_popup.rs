use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::AppState;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, state: &AppState) {
    let help_items = get_help_items(state);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

pub fn get_help_items(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match state.current_screen() {
        Screen::SignIn => {
            items.push(("Enter", "Sign in with Twitch in your browser"));
            if state.session.is_logging_in {
                items.push(("Esc", "Cancel the pending sign-in"));
            }
        }
        Screen::Profile => {
            items.push(("s", "Sign out and revoke the access token"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
            items.push(("h/←/Esc", "Navigate back"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("g then l", "Go to logs"));
    items.push(("?", "Toggle this help"));
    items.push(("q / Ctrl+c", "Quit application"));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_hint_only_while_logging_in() {
        let mut state = AppState::new();
        assert!(!get_help_items(&state).iter().any(|(key, _)| *key == "Esc"));

        state.session.is_logging_in = true;
        assert!(get_help_items(&state).iter().any(|(key, _)| *key == "Esc"));
    }
}
