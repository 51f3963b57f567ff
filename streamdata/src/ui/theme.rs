//! Centralized theme constants and style functions for consistent UI styling.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Twitch brand purple, used for the sign-in button and accents
pub const COLOR_TWITCH: Color = Color::Rgb(145, 71, 255);

/// Color for successful states
pub const COLOR_POSITIVE: Color = Color::Green;

/// Color for failures and error levels
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Color for de-emphasized values
pub const COLOR_MUTED: Color = Color::DarkGray;

/// Color for table headers and key hints
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border color for alert popups
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border color for the help popup
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of the sign-in button including its border
pub const BUTTON_HEIGHT: u16 = 3;

/// Width of the sign-in button
pub const BUTTON_WIDTH: u16 = 32;

// =============================================================================
// Style Functions
// =============================================================================

pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn muted_style() -> Style {
    Style::default().fg(COLOR_MUTED)
}

/// Banner and brand text
pub fn brand_style() -> Style {
    Style::default()
        .fg(COLOR_TWITCH)
        .add_modifier(Modifier::BOLD)
}

/// Filled purple button
pub fn button_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(COLOR_TWITCH)
        .add_modifier(Modifier::BOLD)
}

/// Dims everything under the overlay while a flow is running
pub fn overlay_style() -> Style {
    Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::DIM)
}

pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}
