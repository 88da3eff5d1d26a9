// Season list: every indexed season, newest first, the active one marked.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let active = state.dashboard.season.as_ref();

    let lines: Vec<Line> = if state.dashboard.seasons.is_empty() {
        vec![Line::from(Span::styled(
            "  No seasons",
            Style::default().fg(palette.muted),
        ))]
    } else {
        state
            .dashboard
            .seasons
            .iter()
            .rev()
            .map(|season| {
                if Some(season) == active {
                    Line::from(Span::styled(
                        format!("▸ {season}"),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {season}"),
                        Style::default().fg(palette.text),
                    ))
                }
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Seasons ←/→"),
    );
    frame.render_widget(paragraph, area);
}
