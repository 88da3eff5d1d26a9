// Scoring trend chart.
//
// Draws the sparkline geometry with a ratatui `Chart`: the axis bounds and
// tick labels come from the computed layout, one point per marker. The
// tooltip marker is drawn as a highlighted point and its text shown in the
// block title.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use insights_core::chart::SparklineLayout;
use insights_core::overview::{TrendCard, NO_TREND_DATA};

use crate::tui::ViewState;

/// Above this many points only the first and last week are labelled.
const MAX_WEEK_LABELS: usize = 9;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let palette = state.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(TrendCard::TITLE);

    let TrendCard::Chart { layout, low, high } = &state.dashboard.trend else {
        let paragraph = Paragraph::new(NO_TREND_DATA)
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let block = block.title(
        Line::from(format!("{low} • {high}"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(palette.muted)),
    );
    let block = match tooltip_text(state) {
        Some(text) => block.title_bottom(Line::from(Span::styled(
            format!(" {text} "),
            Style::default()
                .fg(palette.secondary)
                .add_modifier(Modifier::BOLD),
        ))),
        None => block,
    };

    let data = series(layout);
    let highlighted: Vec<(f64, f64)> = state
        .tooltip
        .marker
        .filter(|_| state.tooltip.visible)
        .and_then(|idx| data.get(idx).copied())
        .into_iter()
        .collect();

    let mut datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.accent))
            .data(&data),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(palette.accent))
            .data(&data),
    ];
    if !highlighted.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(palette.secondary))
                .data(&highlighted),
        );
    }

    let x_axis = Axis::default()
        .title(Span::styled(layout.x_title.text.clone(), Style::default().fg(palette.muted)))
        .bounds(x_bounds(layout))
        .labels(x_labels(layout));
    let y_axis = Axis::default()
        .title(Span::styled(layout.y_title.text.clone(), Style::default().fg(palette.muted)))
        .bounds([layout.bounds.lower, layout.bounds.upper])
        .labels(y_labels(layout));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// `(week, value)` per marker.
pub fn series(layout: &SparklineLayout) -> Vec<(f64, f64)> {
    layout
        .markers
        .iter()
        .map(|m| (m.week as f64, m.value))
        .collect()
}

/// Week range of the series, widened by one week on each side for a
/// single point.
pub fn x_bounds(layout: &SparklineLayout) -> [f64; 2] {
    let weeks = layout.markers.iter().map(|m| m.week as f64);
    let lo = weeks.clone().fold(f64::INFINITY, f64::min);
    let hi = weeks.fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() {
        return [0.0, 1.0];
    }
    if hi > lo {
        [lo, hi]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

/// X tick labels, evenly spread by the chart widget.
pub fn x_labels(layout: &SparklineLayout) -> Vec<String> {
    let ticks: Vec<String> = layout.x_ticks.iter().map(|t| t.text.clone()).collect();
    if ticks.len() <= MAX_WEEK_LABELS || ticks.len() < 2 {
        return ticks;
    }
    match (ticks.first(), ticks.last()) {
        (Some(first), Some(last)) => vec![first.clone(), last.clone()],
        _ => ticks,
    }
}

/// Gridline labels bottom to top.
pub fn y_labels(layout: &SparklineLayout) -> Vec<String> {
    layout
        .gridlines
        .iter()
        .rev()
        .map(|g| g.label.text.clone())
        .collect()
}

/// Text of the visible tooltip, if any.
pub fn tooltip_text(state: &ViewState) -> Option<&str> {
    state
        .tooltip
        .visible
        .then_some(state.tooltip.text.as_str())
}
