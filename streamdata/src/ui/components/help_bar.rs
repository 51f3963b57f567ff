//! Bottom bar listing the keys that work on the current screen.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// `hints` are (key, action) pairs, shown as `key action | key action`
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    f.render_widget(
        Paragraph::new(hint_line(hints))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 4);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme::muted_style()));
        }
        if !key.is_empty() {
            spans.push(Span::styled(*key, theme::header_style()));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*action, theme::help_text_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_are_joined() {
        let line = hint_line(&[("Enter", "sign in"), ("q", "quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter sign in | q quit");
    }
}
