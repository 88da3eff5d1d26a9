// Messages exchanged between the TUI, the app orchestrator, and background
// team-insight fetches.

use insights_core::bracket::BracketView;
use insights_core::cache::LoadStatus;
use insights_core::insights::InsightSection;
use insights_core::model::{SeasonId, TeamInsightSet};
use insights_core::overview::{OverviewCard, TrendCard};
use insights_core::selection::TeamChoices;
use insights_core::source::FetchError;
use insights_core::summary::SummaryLine;
use insights_core::theme::Theme;

/// Main panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Overview,
    Awards,
    Standings,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Overview, TabId::Awards, TabId::Standings];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Overview => "Overview",
            TabId::Awards => "Awards",
            TabId::Standings => "Standings",
        }
    }
}

/// Commands from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SelectSeason(SeasonId),
    /// Move to the previous (-1) or next (+1) season.
    StepSeason(isize),
    /// `None` returns to all teams.
    SelectTeam(Option<String>),
    CycleTheme,
    Quit,
}

/// Result of a background team-insight fetch, tagged with its season.
#[derive(Debug)]
pub struct TeamInsightsLoaded {
    pub season: SeasonId,
    pub result: Result<TeamInsightSet, FetchError>,
}

/// Everything the dashboard renders for the current selection.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub league_name: String,
    pub season: Option<SeasonId>,
    pub seasons: Vec<SeasonId>,
    pub generated_at: String,
    pub team_badge: Option<String>,
    pub team_status: LoadStatus,
    pub team_choices: TeamChoices,
    pub overview_cards: Vec<OverviewCard>,
    pub trend: TrendCard,
    pub brackets: Vec<BracketView>,
    pub sections: Vec<InsightSection>,
    pub missing: Vec<String>,
    pub summary: Vec<SummaryLine>,
    pub show_summary: bool,
    pub theme: &'static Theme,
    /// Last non-fatal error, shown in the hero.
    pub status_message: Option<String>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        DashboardSnapshot {
            league_name: "League".to_string(),
            season: None,
            seasons: Vec::new(),
            generated_at: String::new(),
            team_badge: None,
            team_status: LoadStatus::Unloaded,
            team_choices: TeamChoices {
                all_active: true,
                entries: Vec::new(),
                note: String::new(),
            },
            overview_cards: Vec::new(),
            trend: TrendCard::Empty,
            brackets: Vec::new(),
            sections: Vec::new(),
            missing: Vec::new(),
            summary: Vec::new(),
            show_summary: true,
            theme: Theme::default_theme(),
            status_message: None,
        }
    }
}

/// Updates pushed from the orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<DashboardSnapshot>),
}
