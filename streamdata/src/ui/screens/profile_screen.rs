use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};
use streamdata_auth::User;
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::state::{AppState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};

pub const SIGNING_OUT_LABEL: &str = "Signing out...";

pub fn render(f: &mut Frame, state: &AppState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = match &state.session.user {
        Some(user) => format!("Signed in as {}", user.display_name),
        None => "Profile".to_string(),
    };
    screen_title::render_screen_title(f, title_area, &title, &state.activity);

    match &state.session.user {
        Some(user) => render_profile(f, content_area, user),
        None => empty_state::render_empty_state(
            f,
            content_area,
            "Profile",
            "Not signed in",
            Some("Your session ended"),
        ),
    }

    render_help(f, help_area, state);
}

fn profile_rows(user: &User) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Display name", user.display_name.clone()),
        ("Login", user.login.clone()),
        (
            "Email",
            user.email.clone().unwrap_or_else(|| "not shared".to_string()),
        ),
        ("ID", user.id.clone()),
    ];

    if !user.broadcaster_type.is_empty() {
        rows.push(("Broadcaster", user.broadcaster_type.clone()));
    }
    if let Some(created_at) = user.created_at {
        rows.push(("Member since", created_at.format("%Y-%m-%d").to_string()));
    }
    rows.push(("Avatar", user.profile_image_url.clone()));
    if !user.description.is_empty() {
        rows.push(("About", user.description.clone()));
    }

    rows
}

fn render_profile(f: &mut Frame, area: Rect, user: &User) {
    let rows: Vec<Row> = profile_rows(user)
        .into_iter()
        .map(|(label, value)| {
            Row::new(vec![
                Span::styled(label, theme::header_style()),
                Span::raw(value),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(20)])
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::COLOR_TWITCH))
                .title(" Twitch account "),
        );

    f.render_widget(table, area);
}

fn render_help(f: &mut Frame, area: Rect, state: &AppState) {
    match &state.activity {
        LoadingState::Loading(throbber_state) if state.session.is_logging_out => {
            let block = Block::default().borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);
            let width = SIGNING_OUT_LABEL.len() as u16 + 4;
            let throbber = Throbber::default()
                .label(SIGNING_OUT_LABEL)
                .style(theme::loading_style())
                .throbber_set(BRAILLE_EIGHT);
            f.render_stateful_widget(
                throbber,
                layouts::centered_fixed(width, 1, inner),
                &mut throbber_state.clone(),
            );
        }
        _ => help_bar::render_help_bar(
            f,
            area,
            &[("s", "sign out"), ("g l", "logs"), ("?", "help"), ("q", "quit")],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_show_email_fallback_and_skip_empty_fields() {
        let user = User {
            id: "1".to_string(),
            login: "foo".to_string(),
            display_name: "foo".to_string(),
            email: None,
            profile_image_url: "http://example.com/foo.png".to_string(),
            broadcaster_type: String::new(),
            description: String::new(),
            created_at: None,
        };

        let rows = profile_rows(&user);
        assert!(rows.contains(&("Email", "not shared".to_string())));
        assert!(!rows.iter().any(|(label, _)| *label == "Broadcaster"));
        assert!(!rows.iter().any(|(label, _)| *label == "About"));
    }
}
