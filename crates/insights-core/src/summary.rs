// League standings table.

use std::collections::HashMap;

use crate::format::{format_points, DASH};
use crate::model::{FinalPlacement, SummaryRow};

pub const NO_SUMMARY_DATA: &str = "No summary data available.";

pub const SUMMARY_COLUMNS: [&str; 8] = [
    "Rank", "Team", "Record", "PF", "PA", "Waiver", "Moves", "Final",
];

/// Teams without a rank sort after every ranked team.
const UNRANKED: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_place(place: Option<u32>) -> Option<Medal> {
        match place? {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// One rendered standings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub rank: String,
    pub team_name: String,
    pub manager: String,
    pub record: String,
    pub points_for: String,
    pub points_against: String,
    pub waiver_moves: String,
    pub total_moves: String,
    pub final_label: String,
    pub medal: Option<Medal>,
}

/// Build standings rows sorted by rank. Ties keep document order.
pub fn summary_lines(
    rows: &[SummaryRow],
    placements: Option<&HashMap<String, FinalPlacement>>,
) -> Vec<SummaryLine> {
    let mut sorted: Vec<&SummaryRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.rank.filter(|r| *r > 0).unwrap_or(UNRANKED));

    sorted
        .into_iter()
        .map(|row| {
            let placement = row
                .team_key
                .as_deref()
                .and_then(|key| placements.and_then(|p| p.get(key)));
            SummaryLine {
                rank: row.rank.map_or_else(|| DASH.to_string(), |r| r.to_string()),
                team_name: row
                    .team_name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                manager: row
                    .manager_names
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DASH.to_string()),
                record: format!(
                    "{}-{}-{}",
                    row.wins.unwrap_or(0),
                    row.losses.unwrap_or(0),
                    row.ties.unwrap_or(0)
                ),
                points_for: format_points(row.points_for),
                points_against: format_points(row.points_against),
                waiver_moves: row.waiver_moves.unwrap_or(0).to_string(),
                total_moves: row.total_moves.unwrap_or(0).to_string(),
                final_label: placement
                    .and_then(|p| p.final_label.clone())
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| DASH.to_string()),
                medal: Medal::for_place(placement.and_then(|p| p.final_place)),
            }
        })
        .collect()
}
