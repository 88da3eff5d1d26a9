// Controller: owns the catalog, the selection state, the data source, and
// the location, and drives season/team loads.
//
// Season datasets are fetched before any state changes, so a failed fetch
// leaves the previous season on screen. Team insights are optional and
// load in two halves: `select_season` claims the load and hands out a
// `TeamLoadTicket`; the holder fetches (possibly on another task) and
// reports back through `complete_team_load`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::LoadStatus;
use crate::catalog::Catalog;
use crate::location::{Location, SEASON_PARAM};
use crate::model::{SeasonId, SeasonInsights, TeamInsightSet, TeamInsightsDoc};
use crate::selection::{ActiveView, SelectionError, SelectionState, TeamChoices};
use crate::source::{fetch_json, season_insights_path, team_insights_path, DataSource, FetchError};

/// Permission to fetch one season's team insights. Issued at most once per
/// season; the holder must report the outcome via `complete_team_load`.
/// A dropped ticket leaves the season `Loading` until `ensure_team_insights`
/// settles it.
#[must_use = "the season stays `Loading` until the ticket's load is run"]
#[derive(Debug, PartialEq, Eq)]
pub struct TeamLoadTicket {
    season: SeasonId,
}

impl TeamLoadTicket {
    pub fn season(&self) -> &SeasonId {
        &self.season
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SeasonOutcome {
    /// The season was already current.
    Unchanged,
    Loaded { team_load: Option<TeamLoadTicket> },
}

/// Fetch the team-insight document a ticket was issued for.
pub async fn fetch_team_insights(
    source: &dyn DataSource,
    ticket: &TeamLoadTicket,
) -> Result<TeamInsightSet, FetchError> {
    let doc: TeamInsightsDoc = fetch_json(source, &team_insights_path(&ticket.season)).await?;
    Ok(TeamInsightSet::from_doc(doc))
}

pub struct Controller {
    source: Arc<dyn DataSource>,
    catalog: Catalog,
    selection: SelectionState,
    location: Location,
}

impl Controller {
    pub fn new(source: Arc<dyn DataSource>, catalog: Catalog, location: Location) -> Self {
        Controller {
            source,
            catalog,
            selection: SelectionState::new(),
            location,
        }
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current_season(&self) -> Option<&SeasonId> {
        self.selection.current_season()
    }

    /// The season to open first: the location's season if known, otherwise
    /// the most recent one.
    pub fn initial_season(&self) -> Option<SeasonId> {
        self.catalog.resolve_season(self.location.season())
    }

    /// The season `offset` steps away from the current one, if any.
    pub fn adjacent_season(&self, offset: isize) -> Option<SeasonId> {
        let current = self.selection.current_season()?;
        self.catalog.neighbor(current, offset).cloned()
    }

    /// Make `season` current. Re-selecting the current season is a no-op.
    pub async fn select_season(
        &mut self,
        season: &SeasonId,
    ) -> Result<SeasonOutcome, SelectionError> {
        if self.selection.is_current(season) {
            debug!("Season {} already selected", season);
            return Ok(SeasonOutcome::Unchanged);
        }
        if !self.catalog.contains(season) {
            return Err(SelectionError::UnknownSeason {
                season: season.to_string(),
            });
        }

        let data: SeasonInsights =
            fetch_json(self.source.as_ref(), &season_insights_path(season)).await?;
        info!(
            "Loaded season {}: {} insights, {} missing",
            season,
            data.insights.len(),
            data.missing.len()
        );

        self.selection.enter_season(season.clone(), data);
        self.location.set(SEASON_PARAM, season.as_str());

        let team_load = self
            .selection
            .begin_team_load(season)
            .then(|| TeamLoadTicket {
                season: season.clone(),
            });
        Ok(SeasonOutcome::Loaded { team_load })
    }

    /// Record a team-insight load. Failures are downgraded to `missing`.
    /// Returns whether the season is still current.
    pub fn complete_team_load(
        &mut self,
        season: &SeasonId,
        result: Result<TeamInsightSet, FetchError>,
    ) -> bool {
        match &result {
            Ok(set) => info!("Team insights for {}: {} teams", season, set.teams().len()),
            Err(e) => warn!("Team insights unavailable for {}: {}", season, e),
        }
        self.selection.resolve_team_load(season, result);
        self.selection.is_current(season)
    }

    /// Fetch and record the load a ticket was issued for.
    pub async fn run_team_load(&mut self, ticket: TeamLoadTicket) -> bool {
        let result = fetch_team_insights(self.source.as_ref(), &ticket).await;
        self.complete_team_load(&ticket.season, result)
    }

    /// Get-or-load the team insights of `season`, fetching inline.
    ///
    /// A claim still pending from `select_season` is settled here as well;
    /// a ticket holder that reports afterwards cannot overwrite the result.
    /// Returns `None` after a failed load.
    pub async fn ensure_team_insights(&mut self, season: &SeasonId) -> Option<&TeamInsightSet> {
        let fetch = match self.selection.team_status(season) {
            LoadStatus::Unloaded => self.selection.begin_team_load(season),
            LoadStatus::Loading => true,
            LoadStatus::Loaded | LoadStatus::Missing => false,
        };
        if fetch {
            let ticket = TeamLoadTicket {
                season: season.clone(),
            };
            self.run_team_load(ticket).await;
        }
        self.selection.team_insights(season)
    }

    pub fn team_status(&self, season: &SeasonId) -> LoadStatus {
        self.selection.team_status(season)
    }

    pub fn select_team(&mut self, team_key: Option<&str>) -> Result<(), SelectionError> {
        self.selection.select_team(team_key)?;
        debug!("Team selection: {:?}", team_key);
        Ok(())
    }

    pub fn view(&self) -> ActiveView<'_> {
        self.selection.derive_view()
    }

    pub fn team_choices(&self) -> TeamChoices {
        self.selection.team_choices(&self.catalog)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
