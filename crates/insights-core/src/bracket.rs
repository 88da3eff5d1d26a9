// Playoff and consolation bracket view models.

use std::collections::HashMap;

use crate::format::{format_points, DASH};
use crate::model::{Bracket, FinalPlacement, OverviewRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketLine {
    pub team_key: Option<String>,
    pub name: String,
    pub managers: String,
    pub points: String,
    pub is_winner: bool,
    /// Final placement label, set only in the team's last bracket week.
    pub placement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub title: String,
    pub matchups: Vec<Vec<BracketLine>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketView {
    pub title: &'static str,
    pub rounds: Vec<RoundView>,
}

impl BracketView {
    /// Lay out a bracket. Returns `None` when it has no rounds.
    pub fn build(
        title: &'static str,
        bracket: Option<&Bracket>,
        placements: Option<&HashMap<String, FinalPlacement>>,
    ) -> Option<Self> {
        let bracket = bracket.filter(|b| !b.rounds.is_empty())?;

        let mut last_week: HashMap<&str, i64> = HashMap::new();
        for round in &bracket.rounds {
            let Some(week) = round.week else {
                continue;
            };
            for team in round.matchups.iter().flat_map(|m| &m.teams) {
                let Some(key) = team.team_key.as_deref() else {
                    continue;
                };
                let entry = last_week.entry(key).or_insert(week);
                *entry = (*entry).max(week);
            }
        }

        let rounds = bracket
            .rounds
            .iter()
            .map(|round| {
                let matchups = round
                    .matchups
                    .iter()
                    .map(|matchup| {
                        matchup
                            .teams
                            .iter()
                            .map(|team| {
                                let key = team.team_key.as_deref();
                                let in_last_week = round.week.is_some()
                                    && key.and_then(|k| last_week.get(k)).copied() == round.week;
                                let placement = key
                                    .filter(|_| in_last_week)
                                    .and_then(|k| placements.and_then(|p| p.get(k)))
                                    .and_then(|p| p.final_label.clone())
                                    .filter(|l| !l.is_empty());
                                let info = team.team.as_ref();
                                BracketLine {
                                    team_key: team.team_key.clone(),
                                    name: info
                                        .and_then(|t| t.team_name.clone())
                                        .filter(|n| !n.is_empty())
                                        .unwrap_or_else(|| "Unknown".to_string()),
                                    managers: info
                                        .and_then(|t| t.manager_names.clone())
                                        .filter(|m| !m.is_empty())
                                        .unwrap_or_else(|| DASH.to_string()),
                                    points: format_points(team.points),
                                    is_winner: team.is_winner,
                                    placement,
                                }
                            })
                            .collect()
                    })
                    .collect();
                RoundView {
                    title: match round.week {
                        Some(week) => format!("Week {week}"),
                        None => format!("Week {DASH}"),
                    },
                    matchups,
                }
            })
            .collect();

        Some(BracketView { title, rounds })
    }
}

/// Playoff bracket followed by consolation bracket, skipping empty ones.
pub fn overview_brackets(
    overview: Option<&OverviewRecord>,
    placements: Option<&HashMap<String, FinalPlacement>>,
) -> Vec<BracketView> {
    let Some(overview) = overview else {
        return Vec::new();
    };
    [
        BracketView::build("Playoff Bracket", overview.playoff_bracket.as_ref(), placements),
        BracketView::build(
            "Consolation Bracket",
            overview.consolation_bracket.as_ref(),
            placements,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
