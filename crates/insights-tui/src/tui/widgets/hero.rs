// Hero widget: league name, season, data timestamp, and the team view badge.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use insights_core::format::DASH;

use crate::tui::{Palette, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let dashboard = &state.dashboard;

    let mut lines = vec![Line::from(vec![
        Span::styled(
            dashboard.league_name.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(season_label(state), Style::default().fg(palette.text)),
    ])];

    lines.push(Line::from(Span::styled(
        format!("Data generated: {}", dashboard.generated_at),
        Style::default().fg(palette.muted),
    )));

    if let Some(line) = badge_line(state, &palette) {
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(palette.background))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

/// `Season {s}`, or a dash before any season has loaded.
pub fn season_label(state: &ViewState) -> String {
    match &state.dashboard.season {
        Some(season) => format!("Season {season}"),
        None => format!("Season {DASH}"),
    }
}

/// Errors take precedence over the team view badge.
fn badge_line(state: &ViewState, palette: &Palette) -> Option<Line<'static>> {
    let dashboard = &state.dashboard;
    if let Some(message) = &dashboard.status_message {
        return Some(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    dashboard.team_badge.as_ref().map(|badge| {
        Line::from(Span::styled(
            format!(" {badge} "),
            Style::default()
                .fg(Color::Black)
                .bg(palette.secondary)
                .add_modifier(Modifier::BOLD),
        ))
    })
}
