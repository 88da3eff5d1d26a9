// Theme list with colour swatches; `t` cycles through it.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use insights_core::theme::THEMES;

use crate::tui::{rgb, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let current = state.dashboard.theme.id;

    let lines: Vec<Line> = THEMES
        .iter()
        .map(|theme| {
            let active = theme.id == current;
            let name_style = if active {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            Line::from(vec![
                Span::raw(if active { "▸ " } else { "  " }),
                Span::styled("■", Style::default().fg(rgb(theme.swatch[0]))),
                Span::styled("■ ", Style::default().fg(rgb(theme.swatch[1]))),
                Span::styled(theme.name, name_style),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Theme t"));
    frame.render_widget(paragraph, area);
}
