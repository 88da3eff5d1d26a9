// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `DashboardSnapshot` plus the
// purely local bits (active tab, team cursor, chart tooltip, scroll). The
// app orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::Color;
use ratatui::Frame;
use tokio::sync::mpsc;

use insights_core::chart::Tooltip;
use insights_core::theme::{Rgb, Theme};

use crate::protocol::{DashboardSnapshot, TabId, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Terminal colours derived from the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub muted: Color,
    pub background: Color,
}

impl Palette {
    pub fn for_theme(theme: &Theme) -> Self {
        let [accent, secondary] = theme.swatch;
        if theme.light {
            Palette {
                accent: rgb(accent),
                secondary: rgb(secondary),
                text: Color::Black,
                muted: Color::Gray,
                background: Color::White,
            }
        } else {
            Palette {
                accent: rgb(accent),
                secondary: rgb(secondary),
                text: Color::White,
                muted: Color::DarkGray,
                background: Color::Reset,
            }
        }
    }
}

pub fn rgb(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state for rendering.
pub struct ViewState {
    /// Latest snapshot from the orchestrator.
    pub dashboard: DashboardSnapshot,
    pub active_tab: TabId,
    /// Team picker cursor: 0 is `All Teams`, `i` is `team_choices.entries[i - 1]`.
    pub team_cursor: usize,
    /// Chart tooltip driven by `[` and `]`.
    pub tooltip: Tooltip,
    /// Per-tab scroll offsets (in lines).
    pub scroll_offset: HashMap<TabId, usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            dashboard: DashboardSnapshot::default(),
            active_tab: TabId::Overview,
            team_cursor: 0,
            tooltip: Tooltip::default(),
            scroll_offset: HashMap::new(),
        }
    }
}

impl ViewState {
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.dashboard.theme)
    }

    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }

    /// Number of rows in the team picker, including `All Teams`.
    pub fn team_rows(&self) -> usize {
        self.dashboard.team_choices.entries.len() + 1
    }
}

/// Apply a UI update from the orchestrator.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            let season_changed = state.dashboard.season != snapshot.season;
            state.dashboard = *snapshot;

            if season_changed {
                state.tooltip.hide();
                state.scroll_offset.clear();
                state.team_cursor = 0;
            }
            state.team_cursor = state.team_cursor.min(state.team_rows() - 1);

            // Keep the tooltip only while its marker still exists.
            let marker_count = state
                .dashboard
                .trend
                .layout()
                .map_or(0, |layout| layout.markers.len());
            if state.tooltip.marker.is_some_and(|idx| idx >= marker_count) {
                state.tooltip.hide();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::hero::render(frame, layout.hero, state);
    widgets::seasons::render(frame, layout.seasons, state);
    widgets::teams::render(frame, layout.teams, state);
    widgets::themes::render(frame, layout.themes, state);
    widgets::tab_bar::render(frame, layout.tabs, state);

    match state.active_tab {
        TabId::Overview => widgets::overview::render(frame, layout.main_panel, state),
        TabId::Awards => widgets::awards::render(frame, layout.main_panel, state),
        TabId::Standings => widgets::standings::render(frame, layout.main_panel, state),
    }

    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

/// Run the TUI until the user quits or the orchestrator closes the channel.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default panic output.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // 3. Render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 4. Main loop
    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        // Orchestrator exited
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 5. Restore terminal
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use insights_core::chart::{trend_series, Point, SparklineLayout};
    use insights_core::model::{SeasonId, TrendPoint};
    use insights_core::overview::TrendCard;
    use insights_core::selection::{TeamChoice, TeamChoices};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    /// A populated dashboard used by the widget tests.
    pub(crate) fn sample_dashboard() -> DashboardSnapshot {
        let trend: Vec<TrendPoint> = [80.0, 95.0, 110.0, 105.0]
            .iter()
            .enumerate()
            .map(|(i, v)| TrendPoint {
                week: Some(i as i64 + 1),
                avg_points: Some(*v),
            })
            .collect();
        let (values, hints) = trend_series(&trend);
        let layout = SparklineLayout::compute(&values, &hints).unwrap();

        DashboardSnapshot {
            league_name: "Sunday Scaries League".to_string(),
            season: Some(SeasonId::from("2024")),
            seasons: vec![SeasonId::from("2023"), SeasonId::from("2024")],
            generated_at: "2025-01-05 10:00".to_string(),
            trend: TrendCard::Chart {
                layout,
                low: "Low: 80".to_string(),
                high: "High: 110".to_string(),
            },
            team_choices: TeamChoices {
                all_active: true,
                entries: Vec::new(),
                note: "Loading team insights...".to_string(),
            },
            ..DashboardSnapshot::default()
        }
    }

    pub(crate) fn team(key: &str, name: &str, enabled: bool) -> TeamChoice {
        let mut choice = TeamChoice::new(key, Some(name), Some("Mgr"));
        choice.enabled = enabled;
        choice
    }

    fn snapshot(dashboard: DashboardSnapshot) -> UiUpdate {
        UiUpdate::Snapshot(Box::new(dashboard))
    }

    #[test]
    fn view_state_default() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, TabId::Overview);
        assert_eq!(state.team_cursor, 0);
        assert!(!state.tooltip.visible);
        assert_eq!(state.dashboard.season, None);
        assert_eq!(state.team_rows(), 1);
    }

    #[test]
    fn apply_snapshot_replaces_dashboard() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, snapshot(sample_dashboard()));
        assert_eq!(state.dashboard.league_name, "Sunday Scaries League");
        assert_eq!(state.dashboard.season, Some(SeasonId::from("2024")));
    }

    #[test]
    fn season_change_resets_local_state() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, snapshot(sample_dashboard()));

        let layout = state.dashboard.trend.layout().unwrap().clone();
        state
            .tooltip
            .show(&layout, 2, layout.markers[2].center, Point::ORIGIN);
        state.scroll_offset.insert(TabId::Awards, 7);

        // Same season: local state survives.
        apply_ui_update(&mut state, snapshot(sample_dashboard()));
        assert!(state.tooltip.visible);
        assert_eq!(state.scroll(TabId::Awards), 7);

        let mut older = sample_dashboard();
        older.season = Some(SeasonId::from("2023"));
        apply_ui_update(&mut state, snapshot(older));
        assert!(!state.tooltip.visible);
        assert_eq!(state.scroll(TabId::Awards), 0);
    }

    #[test]
    fn tooltip_hidden_when_marker_disappears() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, snapshot(sample_dashboard()));
        let layout = state.dashboard.trend.layout().unwrap().clone();
        state
            .tooltip
            .show(&layout, 3, layout.markers[3].center, Point::ORIGIN);

        let mut flat = sample_dashboard();
        flat.trend = TrendCard::Empty;
        apply_ui_update(&mut state, snapshot(flat));
        assert!(!state.tooltip.visible);
    }

    #[test]
    fn team_cursor_clamped_to_entries() {
        let mut state = ViewState::default();
        let mut dashboard = sample_dashboard();
        dashboard.team_choices.entries = vec![team("t1", "Alpha", true), team("t2", "Beta", true)];
        apply_ui_update(&mut state, snapshot(dashboard));
        state.team_cursor = 2;

        let mut shrunk = sample_dashboard();
        shrunk.team_choices.entries = vec![team("t1", "Alpha", true)];
        apply_ui_update(&mut state, snapshot(shrunk));
        assert_eq!(state.team_cursor, 1);
    }

    #[test]
    fn team_cursor_reset_without_teams() {
        let mut state = ViewState::default();
        state.team_cursor = 5;
        apply_ui_update(&mut state, snapshot(ViewState::default().dashboard));
        assert_eq!(state.team_cursor, 0);
    }

    #[test]
    fn palette_follows_theme() {
        let dark = Palette::for_theme(Theme::by_id("ember").unwrap());
        assert_eq!(dark.accent, Color::Rgb(0xf9, 0x73, 0x16));
        assert_eq!(dark.text, Color::White);

        let light = Palette::for_theme(Theme::by_id("light").unwrap());
        assert_eq!(light.text, Color::Black);
        assert_eq!(light.background, Color::White);
    }

    #[test]
    fn render_frame_every_tab() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, snapshot(sample_dashboard()));
        for tab in TabId::ALL {
            state.active_tab = tab;
            let backend = TestBackend::new(160, 50);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|frame| render_frame(frame, &state)).unwrap();
        }
    }

    #[test]
    fn render_frame_empty_state() {
        let state = ViewState::default();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
