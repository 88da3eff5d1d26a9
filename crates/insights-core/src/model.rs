// JSON document types produced by the insight-generation pipeline.
//
// Every document is consumed as-is. Optional fields default so that partial
// or older exports still deserialize; the view layer renders gaps as a dash.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// SeasonId
// ---------------------------------------------------------------------------

/// Opaque season identifier.
///
/// The exports are inconsistent about whether a season is a JSON string or a
/// number, so both normalize to the textual form. Ordering is numeric when
/// both sides parse as integers and lexical otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SeasonId(String);

impl SeasonId {
    pub fn new(id: impl Into<String>) -> Self {
        SeasonId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier, if it is an integer.
    pub fn numeric(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeasonId {
    fn from(value: &str) -> Self {
        SeasonId::new(value)
    }
}

impl Ord for SeasonId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SeasonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'de> Deserialize<'de> for SeasonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => SeasonId(s),
            Raw::Int(n) => SeasonId(n.to_string()),
            Raw::Float(f) if f.fract() == 0.0 => SeasonId(format!("{}", f as i64)),
            Raw::Float(f) => SeasonId(f.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Shared entity references
// ---------------------------------------------------------------------------

/// A team as embedded inside insights, brackets, and overview records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub manager_names: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_position: Option<String>,
}

// ---------------------------------------------------------------------------
// Startup documents
// ---------------------------------------------------------------------------

/// `insights_index.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsIndex {
    #[serde(default)]
    pub seasons: Vec<SeasonId>,
}

/// One entry of `leagues.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntry {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub league_key: Option<String>,
}

/// One entry of `teams.json`. Older exports use `name`, newer `team_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    #[serde(default)]
    pub league_key: Option<String>,
    pub team_key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub manager_names: Option<String>,
}

/// One per-team, per-season row of `league_summary.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRow {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub manager_names: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub ties: Option<u32>,
    #[serde(default)]
    pub points_for: Option<f64>,
    #[serde(default)]
    pub points_against: Option<f64>,
    #[serde(default)]
    pub waiver_moves: Option<u32>,
    #[serde(default)]
    pub total_moves: Option<u32>,
}

// ---------------------------------------------------------------------------
// Overview records (`league_overview.json`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewRecord {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub snapshot: Option<ScoringSnapshot>,
    #[serde(default)]
    pub competitive_balance: Option<CompetitiveBalance>,
    #[serde(default)]
    pub median_record: Option<MedianRecord>,
    #[serde(default)]
    pub upset_rate: Option<UpsetRate>,
    #[serde(default)]
    pub scoring_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub playoff_bracket: Option<Bracket>,
    #[serde(default)]
    pub consolation_bracket: Option<Bracket>,
    #[serde(default)]
    pub final_placements: Vec<FinalPlacement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSnapshot {
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub avg_weekly_points: Option<f64>,
    #[serde(default)]
    pub avg_margin: Option<f64>,
    #[serde(default)]
    pub closest_margin: Option<f64>,
    #[serde(default)]
    pub blowout_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitiveBalance {
    #[serde(default)]
    pub median_margin: Option<f64>,
    #[serde(default)]
    pub close_threshold: Option<f64>,
    #[serde(default)]
    pub close_games: Option<u32>,
    #[serde(default)]
    pub close_game_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedianRecord {
    #[serde(default)]
    pub median_score: Option<f64>,
    #[serde(default)]
    pub leader: Option<TeamRef>,
    #[serde(default)]
    pub leader_median_wins: Option<f64>,
    #[serde(default)]
    pub biggest_gap_team: Option<TeamRef>,
    #[serde(default)]
    pub biggest_gap: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsetRate {
    #[serde(default)]
    pub upsets: Option<u32>,
    #[serde(default)]
    pub games: Option<u32>,
    #[serde(default)]
    pub rate: Option<f64>,
}

/// One week of the league-wide scoring trend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrendPoint {
    #[serde(default)]
    pub week: Option<i64>,
    #[serde(default)]
    pub avg_points: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bracket {
    #[serde(default)]
    pub rounds: Vec<BracketRound>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BracketRound {
    #[serde(default)]
    pub week: Option<i64>,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Matchup {
    #[serde(default)]
    pub teams: Vec<BracketTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BracketTeam {
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub is_winner: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalPlacement {
    pub team_key: String,
    #[serde(default)]
    pub final_place: Option<u32>,
    #[serde(default)]
    pub final_label: Option<String>,
}

// ---------------------------------------------------------------------------
// Insight documents
// ---------------------------------------------------------------------------

/// A precomputed award or metric.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Insight {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub metric: Option<Value>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub players: Vec<PlayerRef>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// An insight that could not be computed, with the pipeline's reason.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissingInsight {
    pub id: String,
    #[serde(default)]
    pub reason: String,
}

/// `insights_{season}.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonInsights {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub missing: Vec<MissingInsight>,
}

/// `insights_{season}_teams.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInsightsDoc {
    #[serde(default)]
    pub season: Option<SeasonId>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub teams: Vec<TeamInsightBundle>,
}

/// Insights computed for a single team.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamInsightBundle {
    pub team_key: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub manager_names: Option<String>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub missing: Vec<MissingInsight>,
}

/// Team insight bundles for one season, indexed by team key.
#[derive(Debug, Clone, Default)]
pub struct TeamInsightSet {
    teams: Vec<TeamInsightBundle>,
    by_key: HashMap<String, usize>,
}

impl TeamInsightSet {
    pub fn from_doc(doc: TeamInsightsDoc) -> Self {
        let by_key = doc
            .teams
            .iter()
            .enumerate()
            .map(|(idx, team)| (team.team_key.clone(), idx))
            .collect();
        TeamInsightSet {
            teams: doc.teams,
            by_key,
        }
    }

    pub fn get(&self, team_key: &str) -> Option<&TeamInsightBundle> {
        self.by_key.get(team_key).map(|&idx| &self.teams[idx])
    }

    pub fn contains(&self, team_key: &str) -> bool {
        self.by_key.contains_key(team_key)
    }

    pub fn teams(&self) -> &[TeamInsightBundle] {
        &self.teams
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn season_id_accepts_strings_and_numbers() {
        let index: InsightsIndex =
            serde_json::from_value(json!({ "seasons": ["2023", 2024, 2022.0] })).unwrap();
        let ids: Vec<&str> = index.seasons.iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["2023", "2024", "2022"]);
    }

    #[test]
    fn season_id_orders_numerically() {
        let mut seasons = vec![
            SeasonId::from("2024"),
            SeasonId::from("999"),
            SeasonId::from("2010"),
        ];
        seasons.sort();
        let ids: Vec<&str> = seasons.iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["999", "2010", "2024"]);
    }

    #[test]
    fn insight_defaults_optional_fields() {
        let insight: Insight = serde_json::from_value(json!({ "id": "juggernaut" })).unwrap();
        assert_eq!(insight.id, "juggernaut");
        assert!(insight.title.is_empty());
        assert!(insight.metric.is_none());
        assert!(insight.players.is_empty());
        assert!(insight.teams.is_empty());
    }

    #[test]
    fn overview_parses_nested_brackets() {
        let record: OverviewRecord = serde_json::from_value(json!({
            "season": 2024,
            "scoring_trend": [{ "week": 1, "avg_points": 101.5 }, { "week": 2, "avg_points": null }],
            "playoff_bracket": {
                "rounds": [{
                    "week": 15,
                    "matchups": [{
                        "teams": [
                            { "team_key": "t1", "team": { "team_name": "Alpha" }, "points": 120.4, "is_winner": true },
                            { "team_key": "t2", "team": { "team_name": "Beta" }, "points": 99.0 }
                        ]
                    }]
                }]
            },
            "final_placements": [{ "team_key": "t1", "final_place": 1, "final_label": "Champion" }]
        }))
        .unwrap();

        assert_eq!(record.season, Some(SeasonId::from("2024")));
        assert_eq!(record.scoring_trend.len(), 2);
        assert_eq!(record.scoring_trend[1].avg_points, None);
        let bracket = record.playoff_bracket.unwrap();
        let teams = &bracket.rounds[0].matchups[0].teams;
        assert!(teams[0].is_winner);
        assert!(!teams[1].is_winner);
        assert_eq!(record.final_placements[0].final_place, Some(1));
    }

    #[test]
    fn team_insight_set_indexes_by_key() {
        let doc: TeamInsightsDoc = serde_json::from_value(json!({
            "teams": [
                { "team_key": "t1", "team_name": "Alpha", "insights": [], "missing": [] },
                { "team_key": "t2", "team_name": "Beta" }
            ]
        }))
        .unwrap();
        let set = TeamInsightSet::from_doc(doc);
        assert!(set.contains("t2"));
        assert!(!set.contains("t3"));
        assert_eq!(set.get("t1").unwrap().team_name.as_deref(), Some("Alpha"));
        assert_eq!(set.teams().len(), 2);
    }
}
