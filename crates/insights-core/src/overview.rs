// Season overview cards and the scoring trend card.

use crate::chart::{trend_series, SparklineLayout};
use crate::format::{format_number, format_optional_number, format_percent, format_plain, format_team, DASH};
use crate::model::OverviewRecord;

pub const NO_TREND_DATA: &str = "No scoring data available.";
const DEFAULT_CLOSE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub label: String,
    pub value: String,
}

impl CardRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        CardRow {
            label: label.into(),
            value: if value.is_empty() { DASH.to_string() } else { value },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewCard {
    pub title: &'static str,
    pub description: Option<String>,
    pub rows: Vec<CardRow>,
}

/// The summary cards shown above the trend chart.
///
/// A season without an overview record gets a single placeholder snapshot.
pub fn overview_cards(overview: Option<&OverviewRecord>) -> Vec<OverviewCard> {
    let Some(overview) = overview else {
        return vec![OverviewCard {
            title: "Season Snapshot",
            description: None,
            rows: vec![
                CardRow::new("Total points", DASH),
                CardRow::new("Avg weekly points", DASH),
                CardRow::new("Avg margin", DASH),
            ],
        }];
    };

    let snapshot = overview.snapshot.clone().unwrap_or_default();
    let snapshot_card = OverviewCard {
        title: "Season Snapshot",
        description: None,
        rows: vec![
            CardRow::new("Total points", format_optional_number(snapshot.total_points)),
            CardRow::new("Avg weekly points", format_optional_number(snapshot.avg_weekly_points)),
            CardRow::new("Avg margin", format_optional_number(snapshot.avg_margin)),
            CardRow::new("Closest game", format_optional_number(snapshot.closest_margin)),
            CardRow::new("Biggest blowout", format_optional_number(snapshot.blowout_margin)),
        ],
    };

    let balance = overview.competitive_balance.clone().unwrap_or_default();
    let threshold = balance.close_threshold.unwrap_or(DEFAULT_CLOSE_THRESHOLD);
    let close_games = match balance.close_games {
        Some(n) => format!("{n} ({})", format_percent(balance.close_game_rate, 0)),
        None => DASH.to_string(),
    };
    let balance_card = OverviewCard {
        title: "Competitive Balance",
        description: None,
        rows: vec![
            CardRow::new("Median margin", format_optional_number(balance.median_margin)),
            CardRow::new(format!("Close games (<= {})", format_plain(threshold)), close_games),
        ],
    };

    let median = overview.median_record.clone().unwrap_or_default();
    let leader = match median.leader_median_wins {
        Some(wins) => format!("{} ({})", format_team(median.leader.as_ref()), format_plain(wins)),
        None => DASH.to_string(),
    };
    let gap = match median.biggest_gap {
        Some(gap) => {
            let sign = if gap >= 0.0 { "+" } else { "" };
            format!(
                "{} ({sign}{})",
                format_team(median.biggest_gap_team.as_ref()),
                format_plain(gap)
            )
        }
        None => DASH.to_string(),
    };
    let median_card = OverviewCard {
        title: "Median Wins (vs League Median)",
        description: Some(format!(
            "Median score: {}",
            format_optional_number(median.median_score)
        )),
        rows: vec![
            CardRow::new("Weeks scored above Median", leader),
            CardRow::new("Games lost while scoring above median", gap),
        ],
    };

    let upset = overview.upset_rate.clone().unwrap_or_default();
    let upsets = match (upset.upsets, upset.games) {
        (Some(upsets), Some(games)) if games > 0 => format!("{upsets}/{games}"),
        _ => DASH.to_string(),
    };
    let upset_card = OverviewCard {
        title: "Upset Rate",
        description: None,
        rows: vec![
            CardRow::new("Upsets", upsets),
            CardRow::new("Rate", format_percent(upset.rate, 1)),
        ],
    };

    vec![snapshot_card, balance_card, median_card, upset_card]
}

/// The "Scoring Trendline" card.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendCard {
    Chart {
        layout: SparklineLayout,
        low: String,
        high: String,
    },
    Empty,
}

impl TrendCard {
    pub const TITLE: &'static str = "Scoring Trendline";

    pub fn from_overview(overview: Option<&OverviewRecord>) -> Self {
        let Some(overview) = overview else {
            return TrendCard::Empty;
        };
        let (values, hints) = trend_series(&overview.scoring_trend);
        match SparklineLayout::compute(&values, &hints) {
            Some(layout) => TrendCard::Chart {
                low: format!("Low: {}", format_number(layout.min)),
                high: format!("High: {}", format_number(layout.max)),
                layout,
            },
            None => TrendCard::Empty,
        }
    }

    pub fn layout(&self) -> Option<&SparklineLayout> {
        match self {
            TrendCard::Chart { layout, .. } => Some(layout),
            TrendCard::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
