// Help bar: keyboard shortcuts for the current tab.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

const COMMON_KEYS: &[(&str, &str)] = &[
    ("←/→", "season"),
    ("↑/↓", "team"),
    ("Enter", "select"),
    ("a", "all teams"),
    ("t", "theme"),
    ("1-3", "tabs"),
    ("q", "quit"),
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (key, action) in help_entries(state.active_tab) {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {action} "),
            Style::default().fg(Color::Gray),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Key/action pairs shown for `tab`.
pub fn help_entries(tab: TabId) -> Vec<(&'static str, &'static str)> {
    let mut entries = COMMON_KEYS.to_vec();
    match tab {
        TabId::Overview => {
            entries.push(("[/]", "chart point"));
            entries.push(("Esc", "hide tooltip"));
            entries.push(("PgUp/PgDn", "scroll brackets"));
        }
        TabId::Awards | TabId::Standings => entries.push(("PgUp/PgDn", "scroll")),
    }
    entries
}
