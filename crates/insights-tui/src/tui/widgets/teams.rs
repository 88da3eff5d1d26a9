// Team picker: `All Teams` plus one entry per team, with the state note.
//
// Entries stay dimmed until the season's team insights have loaded; the
// cursor row is drawn reversed.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use insights_core::cache::LoadStatus;
use insights_core::selection::ALL_TEAMS;

use crate::tui::{Palette, ViewState};

/// Rows reserved for the note under the list.
const NOTE_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let block = Block::default().borders(Borders::ALL).title(title(state));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(NOTE_HEIGHT)])
        .split(inner);

    let lines = team_lines(state, &palette);
    let visible = sections[0].height as usize;
    let scroll = state.team_cursor.saturating_sub(visible.saturating_sub(1));
    let list = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(list, sections[0]);

    let note = Paragraph::new(state.dashboard.team_choices.note.clone())
        .style(Style::default().fg(palette.muted))
        .wrap(Wrap { trim: true });
    frame.render_widget(note, sections[1]);
}

fn title(state: &ViewState) -> String {
    match state.dashboard.team_status {
        LoadStatus::Loading => "Teams (loading)".to_string(),
        _ => "Teams ↑/↓ Enter".to_string(),
    }
}

/// One line per picker row, `All Teams` first.
pub fn team_lines(state: &ViewState, palette: &Palette) -> Vec<Line<'static>> {
    let choices = &state.dashboard.team_choices;
    let mut lines = Vec::with_capacity(choices.entries.len() + 1);
    lines.push(row(
        ALL_TEAMS.to_string(),
        choices.all_active,
        true,
        state.team_cursor == 0,
        palette,
    ));
    for (idx, entry) in choices.entries.iter().enumerate() {
        lines.push(row(
            entry.label.clone(),
            entry.active,
            entry.enabled,
            state.team_cursor == idx + 1,
            palette,
        ));
    }
    lines
}

fn row(label: String, active: bool, enabled: bool, cursor: bool, palette: &Palette) -> Line<'static> {
    let marker = if active { "● " } else { "  " };
    let mut style = if !enabled {
        Style::default().fg(palette.muted)
    } else if active {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    if cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(Span::styled(format!("{marker}{label}"), style))
}
