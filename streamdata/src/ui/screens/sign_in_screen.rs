use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_EIGHT};

use crate::state::{AppState, LoadingState};
use crate::ui::{
    components::{help_bar, screen_title},
    layouts, theme,
};

pub const SIGN_IN_LABEL: &str = "Sign in with Twitch";
pub const SIGNING_IN_LABEL: &str = "Signing in...";
const TWITCH_GLYPH: &str = "◆";

const BANNER: [&str; 5] = [
    "     _                                _       _        ",
    " ___| |_ _ __ ___  __ _ _ __ ___   __| | __ _| |_ __ _ ",
    "/ __| __| '__/ _ \\/ _` | '_ ` _ \\ / _` |/ _` | __/ _` |",
    "\\__ \\ |_| | |  __/ (_| | | | | | | (_| | (_| | || (_| |",
    "|___/\\__|_|  \\___|\\__,_|_| |_| |_|\\__,_|\\__,_|\\__\\__,_|",
];

pub fn render(f: &mut Frame, state: &AppState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, "streamdata", &state.activity);
    let button_area = render_content(f, content_area);

    if state.session.is_logging_in {
        // Dim everything behind the button while the browser flow runs
        f.buffer_mut().set_style(content_area, theme::overlay_style());
    }

    render_button(f, button_area, state);
    render_help(f, help_area, state);
}

/// Draws the banner and tagline, returning the area reserved for the button
fn render_content(f: &mut Frame, area: Rect) -> Rect {
    let [_, banner_area, partner_area, _, tagline_area, _, button_row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(BANNER.len() as u16),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(theme::BUTTON_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(area);

    let banner: Vec<Line> = BANNER
        .iter()
        .map(|line| Line::from(Span::styled(*line, theme::brand_style())))
        .collect();
    f.render_widget(
        Paragraph::new(banner).alignment(Alignment::Center),
        banner_area,
    );

    f.render_widget(
        Paragraph::new(Span::styled("by twitch", theme::muted_style())).alignment(Alignment::Center),
        partner_area,
    );

    let tagline = vec![
        Line::from("See interesting"),
        Line::from("data about the"),
        Line::from("Twitch world"),
    ];
    f.render_widget(
        Paragraph::new(tagline).alignment(Alignment::Center),
        tagline_area,
    );

    layouts::centered_fixed(theme::BUTTON_WIDTH, theme::BUTTON_HEIGHT, button_row)
}

fn render_button(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_TWITCH))
        .style(theme::button_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &state.activity {
        LoadingState::Loading(throbber_state) if state.session.is_logging_in => {
            render_signing_in(f, inner, throbber_state);
        }
        _ => {
            let label = Line::from(vec![
                Span::raw(TWITCH_GLYPH),
                Span::raw("  "),
                Span::raw(SIGN_IN_LABEL),
            ]);
            f.render_widget(
                Paragraph::new(label)
                    .style(theme::button_style())
                    .alignment(Alignment::Center),
                inner,
            );
        }
    }
}

fn render_signing_in(f: &mut Frame, area: Rect, throbber_state: &ThrobberState) {
    // Room for the spinner glyph and its padding
    let width = SIGNING_IN_LABEL.len() as u16 + 4;
    let throbber_area = layouts::centered_fixed(width, 1, area);

    let throbber = Throbber::default()
        .label(SIGNING_IN_LABEL)
        .style(theme::button_style())
        .throbber_style(theme::button_style())
        .throbber_set(BRAILLE_EIGHT);
    f.render_stateful_widget(throbber, throbber_area, &mut throbber_state.clone());
}

fn render_help(f: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[(&str, &str)] = if state.session.is_logging_in {
        &[("", "Finish signing in in your browser"), ("Esc", "cancel"), ("q", "quit")]
    } else {
        &[("Enter", "sign in"), ("g l", "logs"), ("?", "help"), ("q", "quit")]
    };
    help_bar::render_help_bar(f, area, hints);
}
