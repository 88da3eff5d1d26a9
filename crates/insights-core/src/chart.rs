// Sparkline layout engine for the weekly scoring trend.
//
// Geometry is computed on a fixed logical canvas (840 x 200) and is free of
// any rendering surface. `render_svg` and the dashboard's chart widget are
// thin adapters over `SparklineLayout`.

use std::fmt::Write as _;

use crate::format::format_number;
use crate::model::TrendPoint;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CHART_WIDTH: f64 = 840.0;
pub const CHART_HEIGHT: f64 = 200.0;

pub const PADDING: Padding = Padding {
    left: 56.0,
    right: 18.0,
    top: 12.0,
    bottom: 46.0,
};

/// Smallest amount of headroom added above and below the data.
const MIN_PAD: f64 = 5.0;
/// Headroom as a fraction of the data range, when that exceeds `MIN_PAD`.
const PAD_FRACTION: f64 = 0.15;
/// Axis bounds and tick steps are multiples of this.
const TICK_UNIT: f64 = 10.0;
/// Number of intervals between horizontal gridlines.
const INTERVALS: usize = 4;
pub const GRIDLINE_COUNT: usize = INTERVALS + 1;

const POINT_RADIUS: f64 = 3.0;
const TICK_LABEL_GAP: f64 = 6.0;
const X_TICK_OFFSET: f64 = 14.0;
const TOOLTIP_OFFSET: f64 = 12.0;

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// The inner rectangle that data points are mapped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn standard() -> Self {
        PlotArea {
            left: PADDING.left,
            top: PADDING.top,
            right: CHART_WIDTH - PADDING.right,
            bottom: CHART_HEIGHT - PADDING.bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// A positioned piece of text on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub at: Point,
    pub anchor: Anchor,
    /// Rotation in degrees around `at`.
    pub rotation: Option<f64>,
}

impl TextLabel {
    fn new(text: impl Into<String>, at: Point, anchor: Anchor) -> Self {
        TextLabel {
            text: text.into(),
            at,
            anchor,
            rotation: None,
        }
    }
}

/// Axis hints for the horizontal axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisHints {
    /// Week number for each sample, `None` where the trend entry had none.
    /// Only used when it matches the series length exactly.
    pub weeks: Vec<Option<i64>>,
    pub start_week: Option<i64>,
    pub end_week: Option<i64>,
}

// ---------------------------------------------------------------------------
// Axis bounds
// ---------------------------------------------------------------------------

/// Rounded vertical bounds with exactly `INTERVALS` equal steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
}

impl AxisBounds {
    /// Compute tick-aligned bounds that fully contain `[min, max]` plus
    /// headroom.
    pub fn compute(min: f64, max: f64) -> Self {
        let range = match max - min {
            r if r == 0.0 => 1.0,
            r => r,
        };
        let pad = MIN_PAD.max(range * PAD_FRACTION);
        let lower_raw = min - pad;
        let upper_raw = max + pad;

        let lower = (lower_raw / TICK_UNIT).floor() * TICK_UNIT;
        let mut upper = (upper_raw / TICK_UNIT).ceil() * TICK_UNIT;
        if upper <= lower {
            upper = lower + TICK_UNIT * INTERVALS as f64;
        }

        let mut step = (((upper - lower) / INTERVALS as f64) / TICK_UNIT).ceil() * TICK_UNIT;
        if step < TICK_UNIT {
            step = TICK_UNIT;
        }
        upper = lower + step * INTERVALS as f64;
        while upper < upper_raw {
            step += TICK_UNIT;
            upper = lower + step * INTERVALS as f64;
        }

        AxisBounds { lower, upper, step }
    }

    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    /// Gridline values from top to bottom.
    pub fn ticks(&self) -> [f64; GRIDLINE_COUNT] {
        std::array::from_fn(|idx| self.upper - self.step * idx as f64)
    }

    /// Map a value to a canvas y coordinate (higher values render higher).
    pub fn project(&self, value: f64, area: &PlotArea) -> f64 {
        let range = match self.range() {
            r if r == 0.0 => 1.0,
            r => r,
        };
        area.top + (1.0 - (value - self.lower) / range) * area.height()
    }
}

// ---------------------------------------------------------------------------
// Layout output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub value: f64,
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub label: TextLabel,
}

/// One interactive sample marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub value: f64,
    pub week: i64,
    pub tooltip: String,
}

/// Complete chart geometry for a value series.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineLayout {
    pub width: f64,
    pub height: f64,
    pub area: PlotArea,
    pub bounds: AxisBounds,
    /// Raw minimum of the series.
    pub min: f64,
    /// Raw maximum of the series.
    pub max: f64,
    pub points: Vec<Point>,
    pub gridlines: Vec<Gridline>,
    pub x_ticks: Vec<TextLabel>,
    pub markers: Vec<Marker>,
    pub axis_path: String,
    pub area_path: String,
    pub polyline: String,
    pub y_title: TextLabel,
    pub x_title: TextLabel,
}

impl SparklineLayout {
    /// Lay out `values` on the standard canvas. Returns `None` for an empty
    /// series.
    pub fn compute(values: &[f64], hints: &AxisHints) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bounds = AxisBounds::compute(min, max);
        let area = PlotArea::standard();

        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                let x = if values.len() == 1 {
                    area.center_x()
                } else {
                    area.left + (idx as f64 / (values.len() - 1) as f64) * area.width()
                };
                Point::new(x, bounds.project(value, &area))
            })
            .collect();

        let gridlines = bounds
            .ticks()
            .iter()
            .map(|&value| {
                let y = bounds.project(value, &area);
                Gridline {
                    value,
                    y,
                    x1: area.left,
                    x2: area.right,
                    label: TextLabel::new(
                        format_number(value),
                        Point::new(area.left - TICK_LABEL_GAP, y + 4.0),
                        Anchor::End,
                    ),
                }
            })
            .collect();

        let tick_y = area.bottom + X_TICK_OFFSET;
        let x_ticks = if hints.weeks.len() == points.len() {
            hints
                .weeks
                .iter()
                .zip(&points)
                .filter_map(|(week, p)| {
                    week.map(|w| TextLabel::new(format!("W{w}"), Point::new(p.x, tick_y), Anchor::Middle))
                })
                .collect()
        } else if let (Some(start), Some(end)) = (hints.start_week, hints.end_week) {
            vec![
                TextLabel::new(format!("W{start}"), Point::new(area.left, tick_y), Anchor::Start),
                TextLabel::new(format!("W{end}"), Point::new(area.right, tick_y), Anchor::End),
            ]
        } else {
            Vec::new()
        };

        let markers = points
            .iter()
            .zip(values)
            .enumerate()
            .map(|(idx, (p, &value))| {
                let week = hints.weeks.get(idx).copied().flatten().unwrap_or(idx as i64 + 1);
                Marker {
                    center: *p,
                    radius: POINT_RADIUS,
                    value,
                    week,
                    tooltip: format!("Week {week}: {}", format_number(value)),
                }
            })
            .collect();

        let axis_path = format!(
            "M {} {} L {} {} L {} {}",
            area.left, area.top, area.left, area.bottom, area.right, area.bottom
        );

        let mut area_path = String::new();
        for (idx, p) in points.iter().enumerate() {
            let cmd = if idx == 0 { "M" } else { " L" };
            let _ = write!(area_path, "{cmd} {} {}", p.x, p.y);
        }
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let _ = write!(
                area_path,
                " L {} {} L {} {} Z",
                last.x, area.bottom, first.x, area.bottom
            );
        }

        let polyline = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        let mut y_title = TextLabel::new(
            "Avg Points",
            Point::new(6.0, CHART_HEIGHT / 2.0),
            Anchor::Middle,
        );
        y_title.rotation = Some(-90.0);
        let x_title = TextLabel::new(
            "Week",
            Point::new(CHART_WIDTH / 2.0, CHART_HEIGHT - 6.0),
            Anchor::Middle,
        );

        Some(SparklineLayout {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            area,
            bounds,
            min,
            max,
            points,
            gridlines,
            x_ticks,
            markers,
            axis_path,
            area_path,
            polyline,
            y_title,
            x_title,
        })
    }
}

/// Split a scoring trend into chartable values and axis hints.
///
/// Weeks without an average are skipped; the start and end week still come
/// from the first and last entries of the unfiltered trend.
pub fn trend_series(trend: &[TrendPoint]) -> (Vec<f64>, AxisHints) {
    let kept: Vec<&TrendPoint> = trend.iter().filter(|p| p.avg_points.is_some()).collect();
    let values = kept.iter().filter_map(|p| p.avg_points).collect();
    let weeks = kept.iter().map(|p| p.week).collect();
    let hints = AxisHints {
        weeks,
        start_week: trend.first().and_then(|p| p.week),
        end_week: trend.last().and_then(|p| p.week),
    };
    (values, hints)
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// Position of a floating tooltip relative to its container, given pointer
/// and container origin in the same coordinate space.
pub fn tooltip_offset(pointer: Point, container_origin: Point) -> Point {
    Point::new(
        pointer.x - container_origin.x + TOOLTIP_OFFSET,
        pointer.y - container_origin.y - TOOLTIP_OFFSET,
    )
}

/// Hover state for the sparkline's point markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub visible: bool,
    pub offset: Point,
    /// Index of the marker being hovered.
    pub marker: Option<usize>,
}

impl Tooltip {
    /// Pointer entered a marker.
    pub fn show(&mut self, layout: &SparklineLayout, marker: usize, pointer: Point, origin: Point) {
        let Some(m) = layout.markers.get(marker) else {
            return;
        };
        self.text = m.tooltip.clone();
        self.visible = true;
        self.marker = Some(marker);
        self.offset = tooltip_offset(pointer, origin);
    }

    /// Pointer moved within the current marker.
    pub fn move_to(&mut self, pointer: Point, origin: Point) {
        if self.visible {
            self.offset = tooltip_offset(pointer, origin);
        }
    }

    /// Pointer left the marker.
    pub fn hide(&mut self) {
        self.visible = false;
        self.marker = None;
    }
}

// ---------------------------------------------------------------------------
// SVG adapter
// ---------------------------------------------------------------------------

/// Serialize the layout as a standalone SVG document.
pub fn render_svg(layout: &SparklineLayout) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" class="overview-sparkline">"#,
        layout.width, layout.height
    );
    for grid in &layout.gridlines {
        let _ = write!(
            svg,
            r#"<line x1="{}" x2="{}" y1="{}" y2="{}" class="sparkline-grid"/>"#,
            grid.x1, grid.x2, grid.y, grid.y
        );
        write_text(&mut svg, &grid.label, "sparkline-tick");
    }
    let _ = write!(svg, r#"<path d="{}" class="sparkline-axis"/>"#, layout.axis_path);
    let _ = write!(svg, r#"<path d="{}" class="sparkline-area"/>"#, layout.area_path);
    let _ = write!(svg, r#"<polyline points="{}"/>"#, layout.polyline);
    write_text(&mut svg, &layout.y_title, "sparkline-label");
    write_text(&mut svg, &layout.x_title, "sparkline-label");
    for tick in &layout.x_ticks {
        write_text(&mut svg, tick, "sparkline-tick");
    }
    for marker in &layout.markers {
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" class="sparkline-point"><title>{}</title></circle>"#,
            marker.center.x,
            marker.center.y,
            marker.radius,
            escape(&marker.tooltip)
        );
    }
    svg.push_str("</svg>");
    svg
}

fn write_text(svg: &mut String, label: &TextLabel, class: &str) {
    let transform = label
        .rotation
        .map(|deg| format!(r#" transform="rotate({deg} {} {})""#, label.at.x, label.at.y))
        .unwrap_or_default();
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="{}"{transform} class="{class}">{}</text>"#,
        label.at.x,
        label.at.y,
        label.anchor.as_svg(),
        escape(&label.text)
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly(weeks: &[i64]) -> AxisHints {
        AxisHints {
            weeks: weeks.iter().copied().map(Some).collect(),
            start_week: weeks.first().copied(),
            end_week: weeks.last().copied(),
        }
    }

    fn assert_well_formed(values: &[f64]) -> SparklineLayout {
        let layout = SparklineLayout::compute(values, &AxisHints::default()).unwrap();
        let b = layout.bounds;
        assert_eq!(layout.gridlines.len(), GRIDLINE_COUNT);
        assert!(b.step >= 10.0);
        assert_eq!(b.step % 10.0, 0.0);
        assert_eq!(b.lower % 10.0, 0.0);
        assert_eq!(b.upper, b.lower + 4.0 * b.step);
        for pair in layout.gridlines.windows(2) {
            assert_eq!(pair[0].value - pair[1].value, b.step);
        }
        assert!(b.lower <= layout.min);
        assert!(b.upper >= layout.max);
        layout
    }

    #[test]
    fn empty_series_has_no_chart() {
        assert!(SparklineLayout::compute(&[], &AxisHints::default()).is_none());
    }

    #[test]
    fn bounds_for_typical_trend() {
        let b = AxisBounds::compute(80.0, 110.0);
        assert_eq!(b.lower, 70.0);
        assert_eq!(b.step, 20.0);
        assert_eq!(b.upper, 150.0);
        assert_eq!(b.ticks(), [150.0, 130.0, 110.0, 90.0, 70.0]);
    }

    #[test]
    fn bounds_grow_step_until_data_fits() {
        // Wide ranges need a step larger than the first estimate.
        let b = AxisBounds::compute(3.0, 187.0);
        assert!(b.upper >= 187.0 + 0.15 * 184.0);
        assert_eq!(b.upper, b.lower + 4.0 * b.step);
    }

    #[test]
    fn flat_series_is_not_degenerate() {
        let layout = assert_well_formed(&[100.0, 100.0, 100.0]);
        assert!(layout.bounds.upper > layout.bounds.lower);
        assert!(layout.bounds.step > 0.0);
        assert_eq!(layout.bounds.lower, 90.0);
    }

    #[test]
    fn gridlines_are_well_formed_for_many_series() {
        let cases: &[&[f64]] = &[
            &[0.0],
            &[-12.5, 4.0],
            &[99.99, 100.01],
            &[55.0, 160.2, 140.7, 88.8],
            &[1000.0, 1200.0, 1100.0],
            &[0.3, 0.1, 0.2],
        ];
        for values in cases {
            assert_well_formed(values);
        }
    }

    #[test]
    fn single_sample_is_centered() {
        let layout = SparklineLayout::compute(&[97.0], &weekly(&[5])).unwrap();
        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].x, PlotArea::standard().center_x());
        assert_eq!(layout.points[0].x, 56.0 + 766.0 / 2.0);
    }

    #[test]
    fn values_map_higher_to_smaller_y() {
        let layout = SparklineLayout::compute(&[80.0, 95.0, 110.0, 105.0], &weekly(&[1, 2, 3, 4])).unwrap();
        let ys: Vec<f64> = layout.points.iter().map(|p| p.y).collect();
        assert!(ys[0] > ys[1]);
        assert!(ys[1] > ys[2]);
        assert!(ys[3] > ys[2]);
        let area = layout.area;
        for p in &layout.points {
            assert!(p.y >= area.top && p.y <= area.bottom);
        }
        assert_eq!(layout.points[0].x, area.left);
        assert_eq!(layout.points[3].x, area.right);
    }

    #[test]
    fn week_ticks_label_every_point_when_counts_match() {
        let layout = SparklineLayout::compute(&[80.0, 95.0, 110.0], &weekly(&[1, 2, 3])).unwrap();
        let labels: Vec<&str> = layout.x_ticks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["W1", "W2", "W3"]);
        assert_eq!(layout.x_ticks[1].at.x, layout.points[1].x);
    }

    #[test]
    fn week_ticks_fall_back_to_first_and_last() {
        let hints = AxisHints {
            weeks: vec![Some(1), Some(2)],
            start_week: Some(1),
            end_week: Some(14),
        };
        let layout = SparklineLayout::compute(&[80.0, 95.0, 110.0], &hints).unwrap();
        assert_eq!(layout.x_ticks.len(), 2);
        assert_eq!(layout.x_ticks[0].text, "W1");
        assert_eq!(layout.x_ticks[0].anchor, Anchor::Start);
        assert_eq!(layout.x_ticks[1].text, "W14");
        assert_eq!(layout.x_ticks[1].at.x, layout.area.right);
    }

    #[test]
    fn no_week_ticks_without_hints() {
        let layout = SparklineLayout::compute(&[80.0, 95.0], &AxisHints::default()).unwrap();
        assert!(layout.x_ticks.is_empty());
        assert_eq!(layout.markers[1].tooltip, "Week 2: 95");
    }

    #[test]
    fn paths_close_area_to_baseline() {
        let layout = SparklineLayout::compute(&[80.0, 95.0], &weekly(&[1, 2])).unwrap();
        assert_eq!(layout.axis_path, "M 56 12 L 56 154 L 822 154");
        assert!(layout.area_path.starts_with("M 56 "));
        assert!(layout.area_path.ends_with("L 822 154 L 56 154 Z"));
        assert_eq!(layout.polyline.split(' ').count(), 2);
    }

    #[test]
    fn trend_series_skips_missing_averages() {
        let trend = vec![
            TrendPoint { week: Some(1), avg_points: Some(90.0) },
            TrendPoint { week: Some(2), avg_points: None },
            TrendPoint { week: Some(3), avg_points: Some(110.0) },
        ];
        let (values, hints) = trend_series(&trend);
        assert_eq!(values, vec![90.0, 110.0]);
        assert_eq!(hints.weeks, vec![Some(1), Some(3)]);
        assert_eq!(hints.start_week, Some(1));
        assert_eq!(hints.end_week, Some(3));
    }

    #[test]
    fn null_week_keeps_later_weeks_aligned() {
        let trend = vec![
            TrendPoint { week: Some(1), avg_points: Some(80.0) },
            TrendPoint { week: None, avg_points: Some(90.0) },
            TrendPoint { week: Some(3), avg_points: Some(100.0) },
        ];
        let (values, hints) = trend_series(&trend);
        assert_eq!(hints.weeks, vec![Some(1), None, Some(3)]);

        let layout = SparklineLayout::compute(&values, &hints).unwrap();
        let tips: Vec<&str> = layout.markers.iter().map(|m| m.tooltip.as_str()).collect();
        assert_eq!(tips, vec!["Week 1: 80", "Week 2: 90", "Week 3: 100"]);
        assert_eq!(layout.markers[1].week, 2);

        let labels: Vec<&str> = layout.x_ticks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["W1", "W3"]);
        assert_eq!(layout.x_ticks[1].at.x, layout.points[2].x);
    }

    #[test]
    fn tooltip_follows_pointer_and_hides() {
        let layout = SparklineLayout::compute(&[101.25, 99.0], &weekly(&[7, 8])).unwrap();
        let mut tooltip = Tooltip::default();
        tooltip.show(&layout, 0, Point::new(120.0, 80.0), Point::new(100.0, 50.0));
        assert!(tooltip.visible);
        assert_eq!(tooltip.text, "Week 7: 101.25");
        assert_eq!(tooltip.offset, Point::new(32.0, 18.0));

        tooltip.move_to(Point::new(130.0, 90.0), Point::new(100.0, 50.0));
        assert_eq!(tooltip.offset, Point::new(42.0, 28.0));

        tooltip.hide();
        assert!(!tooltip.visible);
        assert!(tooltip.marker.is_none());
    }

    #[test]
    fn svg_contains_all_primitives() {
        let layout = SparklineLayout::compute(&[80.0, 95.0, 110.0], &weekly(&[1, 2, 3])).unwrap();
        let svg = render_svg(&layout);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("sparkline-grid").count(), 5);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("rotate(-90 6 100)"));
        assert!(svg.contains(">W2</text>"));
    }
}
