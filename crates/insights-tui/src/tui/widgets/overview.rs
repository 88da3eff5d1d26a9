// Overview tab: summary cards across the top, the scoring trend chart, then
// the brackets.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use insights_core::overview::OverviewCard;

use crate::tui::widgets::{brackets, trend_chart};
use crate::tui::{Palette, ViewState};

const TREND_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let cards = &state.dashboard.overview_cards;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(cards_height(cards)),
            Constraint::Length(TREND_HEIGHT),
            Constraint::Min(6),
        ])
        .split(area);

    render_cards(frame, sections[0], state);
    trend_chart::render(frame, sections[1], state);
    brackets::render(frame, sections[2], state);
}

/// Tallest card plus its borders.
pub fn cards_height(cards: &[OverviewCard]) -> u16 {
    let tallest = cards
        .iter()
        .map(|card| card.rows.len() + usize::from(card.description.is_some()))
        .max()
        .unwrap_or(1);
    tallest as u16 + 2
}

fn render_cards(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let cards = &state.dashboard.overview_cards;
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(card_lines(card, &palette))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        card.title,
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(paragraph, *column);
    }
}

/// Optional description, then one `label: value` line per row.
pub fn card_lines(card: &OverviewCard, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(card.rows.len() + 1);
    if let Some(description) = &card.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(palette.muted),
        )));
    }
    for row in &card.rows {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", row.label), Style::default().fg(palette.muted)),
            Span::styled(
                row.value.clone(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines
}
