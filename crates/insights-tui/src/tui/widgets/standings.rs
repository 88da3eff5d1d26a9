// Standings tab: the league summary table, hidden in team view.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use insights_core::format::DASH;
use insights_core::summary::{Medal, SummaryLine, NO_SUMMARY_DATA, SUMMARY_COLUMNS};

use crate::protocol::TabId;
use crate::tui::ViewState;

pub const HIDDEN_IN_TEAM_VIEW: &str =
    "Standings are league-wide. Choose All Teams to show them again.";

const WIDTHS: [Constraint; 8] = [
    Constraint::Length(5),
    Constraint::Min(20),
    Constraint::Length(9),
    Constraint::Length(9),
    Constraint::Length(9),
    Constraint::Length(7),
    Constraint::Length(6),
    Constraint::Min(10),
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let block = Block::default().borders(Borders::ALL).title("Standings");
    let dashboard = &state.dashboard;

    if !dashboard.show_summary || dashboard.summary.is_empty() {
        let message = if dashboard.show_summary {
            NO_SUMMARY_DATA
        } else {
            HIDDEN_IN_TEAM_VIEW
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(SUMMARY_COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = dashboard
        .summary
        .iter()
        .skip(state.scroll(TabId::Standings))
        .map(|line| {
            Row::new(vec![
                Cell::from(line.rank.clone()),
                Cell::from(team_cell(line)),
                Cell::from(line.record.clone()),
                Cell::from(line.points_for.clone()),
                Cell::from(line.points_against.clone()),
                Cell::from(line.waiver_moves.clone()),
                Cell::from(line.total_moves.clone()),
                Cell::from(line.final_label.clone()).style(medal_style(line.medal)),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let table = Table::new(rows, WIDTHS).header(header).block(block);
    frame.render_widget(table, area);
}

/// `Team (Manager)`, or just the team when the manager is unknown.
pub fn team_cell(line: &SummaryLine) -> String {
    if line.manager.is_empty() || line.manager == DASH {
        line.team_name.clone()
    } else {
        format!("{} ({})", line.team_name, line.manager)
    }
}

pub fn medal_style(medal: Option<Medal>) -> Style {
    match medal {
        Some(Medal::Gold) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(Medal::Silver) => Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
        Some(Medal::Bronze) => Style::default()
            .fg(Color::Rgb(0xcd, 0x7f, 0x32))
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    }
}
