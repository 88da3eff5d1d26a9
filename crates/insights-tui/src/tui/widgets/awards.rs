// Awards tab: the missing-award list followed by the grouped award cards.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use insights_core::insights::{BadgeVariant, InsightCard, InsightSection};

use crate::protocol::TabId;
use crate::tui::{Palette, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let title = match &state.dashboard.team_badge {
        Some(badge) => format!("Awards • {badge}"),
        None => "Awards".to_string(),
    };
    let lines = award_lines(&state.dashboard.missing, &state.dashboard.sections, &palette);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll(TabId::Awards) as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// Every line of the tab, top to bottom.
pub fn award_lines(
    missing: &[String],
    sections: &[InsightSection],
    palette: &Palette,
) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("Missing Awards", heading))];
    for line in missing {
        lines.push(Line::from(Span::styled(
            format!("  {line}"),
            Style::default().fg(palette.muted),
        )));
    }

    for section in sections {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            section.name.to_uppercase(),
            heading.add_modifier(Modifier::UNDERLINED),
        )));
        for card in &section.cards {
            lines.extend(card_lines(card, palette));
        }
    }
    lines
}

fn card_lines(card: &InsightCard, palette: &Palette) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        card.title.clone(),
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    )];
    for badge in &card.badges {
        let colour = match badge.variant {
            BadgeVariant::Warm => palette.accent,
            BadgeVariant::Neutral => palette.secondary,
        };
        title.push(Span::raw(" "));
        title.push(Span::styled(
            format!(" {} ", badge.text),
            Style::default().fg(Color::Black).bg(colour),
        ));
    }

    let mut lines = vec![
        Line::default(),
        Line::from(title),
        Line::from(Span::styled(
            card.description,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    for row in &card.rows {
        let value_style = if row.is_team {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", row.label), Style::default().fg(palette.muted)),
            Span::styled(row.value.clone(), value_style),
        ]));
    }
    lines
}
