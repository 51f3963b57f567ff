use std::ops::Range;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme,
};

const TARGET_WIDTH: usize = 24;

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let mut title = format!("Session log ({} entries)", state.total_entries);
    if state.scroll_offset > 0 {
        title.push_str(&format!(", {} above newest", state.scroll_offset));
    }
    f.render_widget(
        Paragraph::new(title).style(theme::title_style()),
        title_area,
    );

    let entries = log_buffer.get_entries();
    if entries.is_empty() {
        empty_state::render_empty_state(
            f,
            content_area,
            "Session log",
            "Nothing logged yet",
            Some("Sign in to see the OAuth flow here"),
        );
    } else {
        render_entries(f, content_area, state, &entries);
    }

    help_bar::render_help_bar(
        f,
        help_area,
        &[
            ("j/k", "scroll"),
            ("PgUp/PgDn", "page"),
            ("gg/G", "oldest/newest"),
            ("h", "back"),
            ("q", "quit"),
        ],
    );
}

/// Window of entries to show, newest at the bottom, `offset` rows up from the end
fn visible_range(total: usize, offset: usize, height: usize) -> Range<usize> {
    let end = total.saturating_sub(offset);
    end.saturating_sub(height)..end
}

fn level_label(level: Level) -> (&'static str, Style) {
    match level {
        Level::ERROR => (
            "ERROR",
            Style::default()
                .fg(theme::COLOR_NEGATIVE)
                .add_modifier(Modifier::BOLD),
        ),
        Level::WARN => ("WARN", Style::default().fg(theme::COLOR_LOADING)),
        Level::INFO => ("INFO", Style::default().fg(theme::COLOR_POSITIVE)),
        Level::DEBUG => ("DEBUG", Style::default().fg(theme::COLOR_TWITCH)),
        Level::TRACE => ("TRACE", theme::muted_style()),
    }
}

fn shorten_target(target: &str) -> String {
    if target.chars().count() <= TARGET_WIDTH {
        return target.to_string();
    }
    // Keep the module path tail, it is the distinguishing part
    let tail: String = target
        .chars()
        .rev()
        .take(TARGET_WIDTH - 1)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{tail}")
}

fn render_entries(f: &mut Frame, area: Rect, state: &LogsState, entries: &[LogEntry]) {
    // Borders plus the header row and its margin
    let height = area.height.saturating_sub(4) as usize;
    let range = visible_range(entries.len(), state.scroll_offset, height);

    let rows: Vec<Row> = entries[range.clone()]
        .iter()
        .map(|entry| {
            let (label, style) = level_label(entry.level);
            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                label.to_string(),
                shorten_target(&entry.target),
                entry.message.clone(),
            ])
            .style(style)
        })
        .collect();

    let title = if range.is_empty() {
        format!(" {} entries ", entries.len())
    } else {
        format!(" {}-{} of {} ", range.start + 1, range.end, entries.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(TARGET_WIDTH as u16),
            Constraint::Min(30),
        ],
    )
    .header(
        Row::new(vec!["Time", "Level", "Target", "Message"])
            .style(theme::header_style())
            .bottom_margin(1),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted_style())
            .title(title),
    );

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_follows_newest_entries() {
        assert_eq!(visible_range(100, 0, 10), 90..100);
        assert_eq!(visible_range(100, 5, 10), 85..95);
        assert_eq!(visible_range(4, 0, 10), 0..4);
        assert_eq!(visible_range(4, 9, 10), 0..0);
    }

    #[test]
    fn test_shorten_target_keeps_tail() {
        assert_eq!(shorten_target("streamdata"), "streamdata");

        let short = shorten_target("streamdata_auth::launcher::browser::server");
        assert_eq!(short.chars().count(), TARGET_WIDTH);
        assert!(short.ends_with("browser::server"));
    }
}
