// Season/team selection state machine.
//
// Exactly one season is current once the first season has loaded. A team
// may be selected only when the current season's team insights are loaded
// and contain that team. Switching seasons always clears the team.

use thiserror::Error;

use crate::cache::{LoadStatus, SeasonCache};
use crate::catalog::Catalog;
use crate::format::team_label;
use crate::model::{
    Insight, MissingInsight, SeasonId, SeasonInsights, TeamInsightBundle, TeamInsightSet,
};
use crate::source::FetchError;

pub const ALL_TEAMS: &str = "All Teams";

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no season is selected")]
    NoSeasonSelected,

    #[error("season {season} is not in the index")]
    UnknownSeason { season: String },

    #[error("team insights for season {season} are not loaded")]
    TeamInsightsNotLoaded { season: SeasonId },

    #[error("team {team_key} is not part of season {season}")]
    UnknownTeam { season: SeasonId, team_key: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Default)]
pub struct SelectionState {
    current_season: Option<SeasonId>,
    season_data: Option<SeasonInsights>,
    current_team: Option<String>,
    team_insights: SeasonCache<TeamInsightSet>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_season(&self) -> Option<&SeasonId> {
        self.current_season.as_ref()
    }

    pub fn season_data(&self) -> Option<&SeasonInsights> {
        self.season_data.as_ref()
    }

    pub fn current_team(&self) -> Option<&str> {
        self.current_team.as_deref()
    }

    pub fn is_current(&self, season: &SeasonId) -> bool {
        self.current_season.as_ref() == Some(season)
    }

    /// Make `season` current with its loaded dataset. Clears the team.
    pub fn enter_season(&mut self, season: SeasonId, data: SeasonInsights) {
        self.current_season = Some(season);
        self.season_data = Some(data);
        self.current_team = None;
    }

    pub fn team_status(&self, season: &SeasonId) -> LoadStatus {
        self.team_insights.status(season)
    }

    pub fn team_insights(&self, season: &SeasonId) -> Option<&TeamInsightSet> {
        self.team_insights.get(season)
    }

    /// Claim the team-insight load for `season`; see `SeasonCache::begin_load`.
    pub fn begin_team_load(&mut self, season: &SeasonId) -> bool {
        self.team_insights.begin_load(season)
    }

    pub fn resolve_team_load<E: ToString>(
        &mut self,
        season: &SeasonId,
        result: Result<TeamInsightSet, E>,
    ) -> LoadStatus {
        self.team_insights.resolve(season, result)
    }

    /// Select a team of the current season, or `None` for all teams.
    ///
    /// Rejections leave the state untouched.
    pub fn select_team(&mut self, team_key: Option<&str>) -> Result<(), SelectionError> {
        let Some(team_key) = team_key else {
            self.current_team = None;
            return Ok(());
        };
        let season = self
            .current_season
            .as_ref()
            .ok_or(SelectionError::NoSeasonSelected)?;
        let set = self
            .team_insights
            .get(season)
            .ok_or_else(|| SelectionError::TeamInsightsNotLoaded {
                season: season.clone(),
            })?;
        if !set.contains(team_key) {
            return Err(SelectionError::UnknownTeam {
                season: season.clone(),
                team_key: team_key.to_string(),
            });
        }
        self.current_team = Some(team_key.to_string());
        Ok(())
    }

    fn active_team(&self) -> Option<&TeamInsightBundle> {
        let season = self.current_season.as_ref()?;
        let key = self.current_team.as_deref()?;
        self.team_insights.get(season)?.get(key)
    }

    /// What the award panels should show right now.
    pub fn derive_view(&self) -> ActiveView<'_> {
        let generated_at = self
            .season_data
            .as_ref()
            .and_then(|d| d.generated_at.as_deref());
        match self.active_team() {
            Some(team) => ActiveView {
                season: self.current_season.as_ref(),
                team: Some(team),
                insights: &team.insights,
                missing: &team.missing,
                show_summary: false,
                generated_at,
            },
            None => ActiveView {
                season: self.current_season.as_ref(),
                team: None,
                insights: self
                    .season_data
                    .as_ref()
                    .map_or(&[][..], |d| d.insights.as_slice()),
                missing: self
                    .season_data
                    .as_ref()
                    .map_or(&[][..], |d| d.missing.as_slice()),
                show_summary: true,
                generated_at,
            },
        }
    }

    /// Team picker entries and the note explaining their state.
    pub fn team_choices(&self, catalog: &Catalog) -> TeamChoices {
        let Some(season) = self.current_season.as_ref() else {
            return TeamChoices {
                all_active: true,
                entries: Vec::new(),
                note: NO_TEAM_LIST.to_string(),
            };
        };
        let loaded = self.team_insights.get(season);

        let mut entries: Vec<TeamChoice> = match loaded.filter(|set| !set.is_empty()) {
            Some(set) => set
                .teams()
                .iter()
                .map(|t| TeamChoice::new(&t.team_key, t.team_name.as_deref(), t.manager_names.as_deref()))
                .collect(),
            None => catalog
                .teams_for(season)
                .iter()
                .map(|t| TeamChoice::new(&t.team_key, Some(&t.team_name), t.manager_names.as_deref()))
                .collect(),
        };
        entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
        for entry in &mut entries {
            entry.enabled = loaded.is_some();
            entry.active = self.current_team.as_deref() == Some(entry.team_key.as_str());
        }

        let note = if entries.is_empty() {
            NO_TEAM_LIST.to_string()
        } else if loaded.is_none() {
            match self.team_insights.status(season) {
                LoadStatus::Loading | LoadStatus::Unloaded => LOADING_TEAMS.to_string(),
                _ => TEAMS_UNAVAILABLE.to_string(),
            }
        } else if let Some(key) = self.current_team.as_deref() {
            let label = entries
                .iter()
                .find(|e| e.team_key == key)
                .map_or("Selected team", |e| e.label.as_str());
            format!("Showing {label} insights. Choose All Teams to return to league-wide awards.")
        } else {
            PICK_A_TEAM.to_string()
        };

        TeamChoices {
            all_active: self.current_team.is_none(),
            entries,
            note,
        }
    }
}

const NO_TEAM_LIST: &str = "No team list available for this season.";
const LOADING_TEAMS: &str = "Loading team insights...";
const TEAMS_UNAVAILABLE: &str = "Team insights are not available for this season.";
const PICK_A_TEAM: &str =
    "Pick a team to view manager-specific insights, or stay on All Teams for league-wide awards.";

/// The insight lists currently on display.
#[derive(Debug, Clone, Copy)]
pub struct ActiveView<'a> {
    pub season: Option<&'a SeasonId>,
    /// Set in team view.
    pub team: Option<&'a TeamInsightBundle>,
    pub insights: &'a [Insight],
    pub missing: &'a [MissingInsight],
    /// Standings are hidden in team view.
    pub show_summary: bool,
    pub generated_at: Option<&'a str>,
}

impl ActiveView<'_> {
    /// `Team View • {label}` badge text in team view.
    pub fn team_badge(&self) -> Option<String> {
        self.team.map(|t| {
            format!(
                "Team View • {}",
                team_label(t.team_name.as_deref(), t.manager_names.as_deref())
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamChoice {
    pub team_key: String,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
    sort_key: String,
}

impl TeamChoice {
    /// A disabled, inactive entry labelled from `name` and `managers`.
    pub fn new(team_key: &str, name: Option<&str>, managers: Option<&str>) -> Self {
        TeamChoice {
            team_key: team_key.to_string(),
            label: team_label(name, managers),
            enabled: false,
            active: false,
            sort_key: name.unwrap_or_default().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamChoices {
    /// The `All Teams` entry is active.
    pub all_active: bool,
    pub entries: Vec<TeamChoice>,
    pub note: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
