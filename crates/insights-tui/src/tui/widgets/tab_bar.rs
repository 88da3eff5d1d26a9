// Tab indicator for the main panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::{Palette, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let paragraph = Paragraph::new(Line::from(tab_spans(state.active_tab, &palette)));
    frame.render_widget(paragraph, area);
}

/// `[1:Overview] [2:Awards] [3:Standings]` with the active tab highlighted.
pub fn tab_spans(active: TabId, palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (idx, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::styled(format!("[{}:{}]", idx + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::theme::Theme;

    #[test]
    fn tab_spans_highlight_active() {
        let palette = Palette::for_theme(Theme::default_theme());
        let spans = tab_spans(TabId::Awards, &palette);
        assert_eq!(spans[2].content, "[2:Awards]");
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[4].content, "[3:Standings]");
    }
}
