// Season catalog: the documents loaded eagerly at startup, indexed by season.

use std::collections::HashMap;

use anyhow::Context;
use tracing::{debug, info};

use crate::model::{
    FinalPlacement, InsightsIndex, LeagueEntry, OverviewRecord, SeasonId, SummaryRow, TeamEntry,
};
use crate::source::{
    fetch_json, DataSource, INDEX_PATH, LEAGUES_PATH, OVERVIEW_PATH, SUMMARY_PATH, TEAMS_PATH,
};

/// A team known from `teams.json`, attributed to a season via its league key.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTeam {
    pub team_key: String,
    pub team_name: String,
    pub manager_names: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueInfo {
    pub name: Option<String>,
    pub league_key: Option<String>,
}

/// Everything known about the available seasons before any season detail
/// document is fetched.
#[derive(Debug, Default)]
pub struct Catalog {
    seasons: Vec<SeasonId>,
    leagues: HashMap<SeasonId, LeagueInfo>,
    season_by_league_key: HashMap<String, SeasonId>,
    teams: HashMap<SeasonId, Vec<CatalogTeam>>,
    summary: HashMap<SeasonId, Vec<SummaryRow>>,
    overview: HashMap<SeasonId, OverviewRecord>,
    placements: HashMap<SeasonId, HashMap<String, FinalPlacement>>,
}

impl Catalog {
    /// Fetch the five startup documents. Any failure is fatal: the dashboard
    /// cannot start without them.
    pub async fn load(source: &dyn DataSource) -> anyhow::Result<Self> {
        info!("Loading season catalog from {}", source.describe());

        let index: InsightsIndex = fetch_json(source, INDEX_PATH)
            .await
            .context("failed to load season index")?;
        let leagues: Vec<LeagueEntry> = fetch_json(source, LEAGUES_PATH)
            .await
            .context("failed to load leagues")?;
        let teams: Vec<TeamEntry> = fetch_json(source, TEAMS_PATH)
            .await
            .context("failed to load teams")?;
        let summary: Vec<SummaryRow> = fetch_json(source, SUMMARY_PATH)
            .await
            .context("failed to load league summary")?;
        let overview: Vec<OverviewRecord> = fetch_json(source, OVERVIEW_PATH)
            .await
            .context("failed to load league overview")?;

        let catalog = Catalog::from_documents(index, leagues, teams, summary, overview);
        info!(
            "Catalog loaded: {} seasons, {} with overview data",
            catalog.seasons.len(),
            catalog.overview.len()
        );
        Ok(catalog)
    }

    /// Build the catalog from already-decoded documents.
    pub fn from_documents(
        index: InsightsIndex,
        leagues: Vec<LeagueEntry>,
        teams: Vec<TeamEntry>,
        summary: Vec<SummaryRow>,
        overview: Vec<OverviewRecord>,
    ) -> Self {
        let mut catalog = Catalog {
            seasons: index.seasons,
            ..Default::default()
        };
        catalog.seasons.sort();

        for league in leagues {
            let Some(season) = league.season else {
                continue;
            };
            if let Some(key) = &league.league_key {
                catalog
                    .season_by_league_key
                    .insert(key.clone(), season.clone());
            }
            catalog.leagues.insert(
                season,
                LeagueInfo {
                    name: league.name,
                    league_key: league.league_key,
                },
            );
        }

        for team in teams {
            let Some(season) = team
                .league_key
                .as_ref()
                .and_then(|key| catalog.season_by_league_key.get(key))
                .cloned()
            else {
                debug!("Skipping team {} with unknown league", team.team_key);
                continue;
            };
            let team_name = team
                .name
                .filter(|n| !n.is_empty())
                .or(team.team_name.filter(|n| !n.is_empty()))
                .unwrap_or_else(|| "Unknown".to_string());
            catalog.teams.entry(season).or_default().push(CatalogTeam {
                team_key: team.team_key,
                team_name,
                manager_names: team.manager_names,
            });
        }

        for row in summary {
            let Some(season) = row.season.clone() else {
                continue;
            };
            catalog.summary.entry(season).or_default().push(row);
        }

        for record in overview {
            let Some(season) = record.season.clone() else {
                continue;
            };
            let placements = record
                .final_placements
                .iter()
                .map(|p| (p.team_key.clone(), p.clone()))
                .collect();
            catalog.placements.insert(season.clone(), placements);
            catalog.overview.insert(season, record);
        }

        catalog
    }

    /// Known seasons, ascending.
    pub fn seasons(&self) -> &[SeasonId] {
        &self.seasons
    }

    pub fn contains(&self, season: &SeasonId) -> bool {
        self.seasons.contains(season)
    }

    /// The most recent season.
    pub fn latest(&self) -> Option<&SeasonId> {
        self.seasons.last()
    }

    /// The requested season if it is known, otherwise the most recent one.
    pub fn resolve_season(&self, requested: Option<&str>) -> Option<SeasonId> {
        requested
            .and_then(|r| self.seasons.iter().find(|s| s.as_str() == r))
            .or_else(|| self.latest())
            .cloned()
    }

    /// Season before/after `season` in catalog order (`offset` of -1 or 1).
    pub fn neighbor(&self, season: &SeasonId, offset: isize) -> Option<&SeasonId> {
        let idx = self.seasons.iter().position(|s| s == season)?;
        let target = idx.checked_add_signed(offset)?;
        self.seasons.get(target)
    }

    pub fn league_name(&self, season: &SeasonId) -> Option<&str> {
        self.leagues.get(season).and_then(|l| l.name.as_deref())
    }

    pub fn league(&self, season: &SeasonId) -> Option<&LeagueInfo> {
        self.leagues.get(season)
    }

    pub fn teams_for(&self, season: &SeasonId) -> &[CatalogTeam] {
        self.teams.get(season).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary_for(&self, season: &SeasonId) -> &[SummaryRow] {
        self.summary.get(season).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn overview_for(&self, season: &SeasonId) -> Option<&OverviewRecord> {
        self.overview.get(season)
    }

    pub fn placements_for(&self, season: &SeasonId) -> Option<&HashMap<String, FinalPlacement>> {
        self.placements.get(season)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
