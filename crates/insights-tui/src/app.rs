// Application state and orchestration logic.
//
// The central event loop owns the `Controller` (and with it every piece of
// selection state). It consumes user commands from the TUI and completion
// events from spawned team-insight fetches, and pushes a fresh dashboard
// snapshot to the TUI after every state change.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use insights_core::bracket::overview_brackets;
use insights_core::cache::LoadStatus;
use insights_core::controller::{fetch_team_insights, Controller, SeasonOutcome, TeamLoadTicket};
use insights_core::format::format_generated_at;
use insights_core::insights::{group_insights, missing_lines};
use insights_core::model::SeasonId;
use insights_core::overview::{overview_cards, TrendCard};
use insights_core::store::PreferenceStore;
use insights_core::summary::summary_lines;
use insights_core::theme::Theme;

use crate::protocol::{DashboardSnapshot, TeamInsightsLoaded, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: Controller,
    pub store: PreferenceStore,
    pub theme: &'static Theme,
    /// Last non-fatal error to surface in the hero.
    pub status_message: Option<String>,
    /// Spawned team-insight fetches report back through clones of this.
    pub team_tx: mpsc::Sender<TeamInsightsLoaded>,
}

impl AppState {
    pub fn new(
        controller: Controller,
        store: PreferenceStore,
        theme: &'static Theme,
        team_tx: mpsc::Sender<TeamInsightsLoaded>,
    ) -> Self {
        AppState {
            controller,
            store,
            theme,
            status_message: None,
            team_tx,
        }
    }

    /// Assemble the dashboard view for the current selection.
    pub fn build_snapshot(&self) -> DashboardSnapshot {
        let ctl = &self.controller;
        let catalog = ctl.catalog();
        let view = ctl.view();
        let season = view.season.cloned();

        let (overview, placements, summary_rows, league_name) = match &season {
            Some(s) => (
                catalog.overview_for(s),
                catalog.placements_for(s),
                catalog.summary_for(s),
                catalog.league_name(s),
            ),
            None => (None, None, &[][..], None),
        };

        DashboardSnapshot {
            league_name: league_name.unwrap_or("League").to_string(),
            seasons: catalog.seasons().to_vec(),
            generated_at: format_generated_at(view.generated_at),
            team_badge: view.team_badge(),
            team_status: season
                .as_ref()
                .map_or(LoadStatus::Unloaded, |s| ctl.team_status(s)),
            team_choices: ctl.team_choices(),
            overview_cards: overview_cards(overview),
            trend: TrendCard::from_overview(overview),
            brackets: overview_brackets(overview, placements),
            sections: group_insights(view.insights),
            missing: missing_lines(view.missing),
            summary: summary_lines(summary_rows, placements),
            show_summary: view.show_summary,
            theme: self.theme,
            status_message: self.status_message.clone(),
            season,
        }
    }

    async fn push_snapshot(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        let snapshot = self.build_snapshot();
        let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
    }

    /// Load `season`, push the season-level view, then start the team fetch.
    pub async fn open_season(&mut self, season: &SeasonId, ui_tx: &mpsc::Sender<UiUpdate>) {
        match self.controller.select_season(season).await {
            Ok(SeasonOutcome::Unchanged) => {}
            Ok(SeasonOutcome::Loaded { team_load }) => {
                self.status_message = None;
                if let Err(e) = self.store.save_location(self.controller.location()) {
                    warn!("Failed to persist location: {:#}", e);
                }
                self.push_snapshot(ui_tx).await;
                if let Some(ticket) = team_load {
                    self.spawn_team_load(ticket);
                }
            }
            Err(e) => {
                warn!("Failed to load season {}: {}", season, e);
                self.status_message = Some(format!("Season {season} could not be loaded: {e}"));
                self.push_snapshot(ui_tx).await;
            }
        }
    }

    /// Fetch team insights on a separate task. The result comes back through
    /// `team_tx`.
    pub fn spawn_team_load(&self, ticket: TeamLoadTicket) {
        let source = self.controller.source();
        let tx = self.team_tx.clone();
        debug!("Spawning team insight load for {}", ticket.season());
        tokio::spawn(async move {
            let result = fetch_team_insights(source.as_ref(), &ticket).await;
            let _ = tx
                .send(TeamInsightsLoaded {
                    season: ticket.season().clone(),
                    result,
                })
                .await;
        });
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        info!("Theme switched to {}", self.theme.id);
        if let Err(e) = self.store.save_theme(self.theme.id) {
            warn!("Failed to persist theme: {:#}", e);
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Opens the initial season (the location's season, else the latest), then
/// listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Completed team-insight fetches
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut team_rx: mpsc::Receiver<TeamInsightsLoaded>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    match state.controller.initial_season() {
        Some(season) => {
            let ticket = match state.controller.select_season(&season).await? {
                SeasonOutcome::Loaded { team_load } => team_load,
                SeasonOutcome::Unchanged => None,
            };
            if let Err(e) = state.store.save_location(state.controller.location()) {
                warn!("Failed to persist location: {:#}", e);
            }
            state.push_snapshot(&ui_tx).await;
            if let Some(ticket) = ticket {
                state.spawn_team_load(ticket);
            }
        }
        None => {
            warn!("Season index is empty");
            state.status_message = Some("No seasons available.".to_string());
            state.push_snapshot(&ui_tx).await;
        }
    }

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Team insight loads ---
            Some(loaded) = team_rx.recv() => {
                handle_team_loaded(&mut state, loaded, &ui_tx).await;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Record a finished team-insight fetch. The view refreshes only if the
/// season is still on screen.
async fn handle_team_loaded(
    state: &mut AppState,
    loaded: TeamInsightsLoaded,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let TeamInsightsLoaded { season, result } = loaded;
    if state.controller.complete_team_load(&season, result) {
        state.push_snapshot(ui_tx).await;
    } else {
        debug!("Team insights for {} arrived after leaving the season", season);
    }
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SelectSeason(season) => {
            state.open_season(&season, ui_tx).await;
        }
        UserCommand::StepSeason(offset) => {
            if let Some(season) = state.controller.adjacent_season(offset) {
                state.open_season(&season, ui_tx).await;
            }
        }
        UserCommand::SelectTeam(team_key) => {
            match state.controller.select_team(team_key.as_deref()) {
                Ok(()) => state.status_message = None,
                Err(e) => {
                    info!("Team selection rejected: {}", e);
                }
            }
            state.push_snapshot(ui_tx).await;
        }
        UserCommand::CycleTheme => {
            state.cycle_theme();
            state.push_snapshot(ui_tx).await;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
