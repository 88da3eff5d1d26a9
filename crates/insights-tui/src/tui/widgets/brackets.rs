// Playoff and consolation brackets.
//
// Each bracket renders as a column per round; a matchup is a pair of team
// lines (name, score) with the winner emphasized and the final placement
// shown beside a team's last game.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use insights_core::bracket::{BracketLine, BracketView, RoundView};

use crate::protocol::TabId;
use crate::tui::{Palette, ViewState};

/// Width of the score column in a team line.
const SCORE_WIDTH: usize = 7;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let brackets = &state.dashboard.brackets;
    if brackets.is_empty() {
        let paragraph = Paragraph::new("No bracket data available.")
            .style(Style::default().fg(palette.muted))
            .block(Block::default().borders(Borders::ALL).title("Brackets"));
        frame.render_widget(paragraph, area);
        return;
    }

    let constraints: Vec<Constraint> = brackets
        .iter()
        .map(|_| Constraint::Ratio(1, brackets.len() as u32))
        .collect();
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let scroll = state.scroll(TabId::Overview) as u16;
    for (bracket, area) in brackets.iter().zip(areas.iter()) {
        render_bracket(frame, *area, bracket, scroll, &palette);
    }
}

fn render_bracket(frame: &mut Frame, area: Rect, bracket: &BracketView, scroll: u16, palette: &Palette) {
    let block = Block::default().borders(Borders::ALL).title(bracket.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if bracket.rounds.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = bracket
        .rounds
        .iter()
        .map(|_| Constraint::Ratio(1, bracket.rounds.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (round, column) in bracket.rounds.iter().zip(columns.iter()) {
        let width = column.width.saturating_sub(1) as usize;
        let paragraph = Paragraph::new(round_lines(round, width, palette)).scroll((scroll, 0));
        frame.render_widget(paragraph, *column);
    }
}

/// Round title, then each matchup's team lines separated by a blank line.
pub fn round_lines(round: &RoundView, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        round.title.clone(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    for matchup in &round.matchups {
        for team in matchup {
            lines.push(team_line(team, width, palette));
            if let Some(placement) = &team.placement {
                lines.push(Line::from(Span::styled(
                    format!("  ↳ {placement}"),
                    Style::default().fg(palette.secondary),
                )));
            }
        }
        lines.push(Line::default());
    }
    lines
}

fn team_line(team: &BracketLine, width: usize, palette: &Palette) -> Line<'static> {
    let style = if team.is_winner {
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    Line::from(Span::styled(format_team_line(team, width), style))
}

/// `name (managers)` padded or truncated to `width`, score right-aligned.
pub fn format_team_line(team: &BracketLine, width: usize) -> String {
    let label = if team.managers.is_empty() {
        team.name.clone()
    } else {
        format!("{} ({})", team.name, team.managers)
    };
    let name_width = width.saturating_sub(SCORE_WIDTH + 1);
    let name: String = label.chars().take(name_width).collect();
    format!(
        "{name:<name_width$} {score:>SCORE_WIDTH$}",
        score = team.points
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::draw;
    use insights_core::theme::Theme;

    fn line(name: &str, points: &str, winner: bool, placement: Option<&str>) -> BracketLine {
        BracketLine {
            team_key: Some(name.to_lowercase()),
            name: name.to_string(),
            managers: "Mgr".to_string(),
            points: points.to_string(),
            is_winner: winner,
            placement: placement.map(str::to_string),
        }
    }

    fn bracket() -> BracketView {
        BracketView {
            title: "Playoff Bracket",
            rounds: vec![RoundView {
                title: "Week 15".to_string(),
                matchups: vec![vec![
                    line("Ghosts", "131.2", true, Some("Champion")),
                    line("Heroes", "98.4", false, Some("Runner-up")),
                ]],
            }],
        }
    }

    #[test]
    fn format_team_line_fits_width() {
        let text = format_team_line(&line("Gridiron Ghosts", "131.2", true, None), 30);
        assert_eq!(text.chars().count(), 30);
        assert!(text.starts_with("Gridiron Ghosts (Mgr)"));
        assert!(text.ends_with("  131.2"));

        let narrow = format_team_line(&line("Gridiron Ghosts", "131.2", true, None), 16);
        assert_eq!(narrow, "Gridiron   131.2");
    }

    #[test]
    fn round_lines_include_placements() {
        let palette = Palette::for_theme(Theme::default_theme());
        let bracket = bracket();
        let lines = round_lines(&bracket.rounds[0], 30, &palette);
        // title, two teams each with a placement, trailing blank
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2].spans[0].content, "  ↳ Champion");
        assert!(lines[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[3].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn renders_brackets_or_placeholder() {
        let mut state = ViewState::default();
        let text = draw(60, 8, &state, render);
        assert!(text.contains("No bracket data available."));

        state.dashboard.brackets = vec![bracket()];
        let text = draw(60, 10, &state, render);
        assert!(text.contains("Playoff Bracket"));
        assert!(text.contains("Week 15"));
        assert!(text.contains("Champion"));
    }
}
