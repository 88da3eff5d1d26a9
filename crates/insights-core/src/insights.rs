// Award grouping and card presentation.

use crate::format::{format_player, format_team, metric_entries, pretty_label, team_label, MetricEntry};
use crate::model::{Insight, MissingInsight};

pub const OTHER_SECTION: &str = "Other";

const PERFORMANCE: &str = "Performance & Results";
const PAIN: &str = "Pain, Chaos & Heartbreak";
const TENDENCIES: &str = "Manager Tendencies";
const DRAFT: &str = "Draft & Value";
const START_SIT: &str = "Start/Sit Decisions";
const PLAYER_STATS: &str = "Player Stats";
const STORYLINES: &str = "Weekly & Seasonal Storylines";
const FUN: &str = "Fun Awards";

/// Display order of sections. `Other` collects unmapped ids and is always
/// last.
pub const SECTION_ORDER: [&str; 9] = [
    PERFORMANCE,
    PAIN,
    TENDENCIES,
    DRAFT,
    START_SIT,
    PLAYER_STATS,
    STORYLINES,
    FUN,
    OTHER_SECTION,
];

pub const SECTION_MAP: [(&str, &str); 34] = [
    ("league_champion_dna", PERFORMANCE),
    ("paper_tiger", PERFORMANCE),
    ("unluckiest_manager", PERFORMANCE),
    ("juggernaut", PERFORMANCE),
    ("consistent_king", PERFORMANCE),
    ("boom_or_bust", PERFORMANCE),
    ("soul_crushing_loss", PAIN),
    ("highest_score_loss", PAIN),
    ("blowout_victim", PAIN),
    ("schedule_screwed_me", PAIN),
    ("always_the_bridesmaid", PAIN),
    ("ride_or_die", TENDENCIES),
    ("fantasy_sicko", TENDENCIES),
    ("waiver_wire_addict", TENDENCIES),
    ("trade_machine", TENDENCIES),
    ("draft_loyalist", TENDENCIES),
    ("commitment_issues", TENDENCIES),
    ("draft_steal", DRAFT),
    ("draft_bust", DRAFT),
    ("reached_and_regretted", DRAFT),
    ("late_round_wizardry", DRAFT),
    ("bench_war_crime", START_SIT),
    ("set_and_forget", START_SIT),
    ("overthinker", START_SIT),
    ("favorite_player", PLAYER_STATS),
    ("emotional_support", PLAYER_STATS),
    ("why_dont_he_want_me", PLAYER_STATS),
    ("peak_week", STORYLINES),
    ("rock_bottom", STORYLINES),
    ("mid_season_glow_up", STORYLINES),
    ("late_season_collapse", STORYLINES),
    ("looked_better_on_paper", FUN),
    ("trust_the_process", FUN),
    ("well_get_em_next_year", FUN),
];

pub const AWARD_DESCRIPTIONS: [(&str, &str); 34] = [
    ("league_champion_dna", "Most weeks finishing among the top three regular-season scores."),
    ("paper_tiger", "Best win-loss record paired with the lowest average points scored."),
    ("unluckiest_manager", "Most total points scored against their team over the season."),
    ("juggernaut", "Highest average points per week."),
    ("consistent_king", "Lowest week-to-week scoring variance."),
    ("boom_or_bust", "Highest week-to-week scoring variance."),
    ("soul_crushing_loss", "Closest loss of the season."),
    ("highest_score_loss", "Highest single-week score that still resulted in a loss."),
    ("blowout_victim", "Largest margin of defeat."),
    ("schedule_screwed_me", "Worst swing between actual wins and league-average wins."),
    ("always_the_bridesmaid", "Lowest average margin of loss (min 3 losses)."),
    ("ride_or_die", "Fewest roster changes across the season."),
    ("fantasy_sicko", "Highest roster churn across the season."),
    ("waiver_wire_addict", "Most waiver adds and drops."),
    ("trade_machine", "Most trades completed."),
    ("draft_loyalist", "Most drafted players still on the final roster."),
    ("commitment_issues", "Fewest drafted players still on the final roster."),
    ("draft_steal", "Biggest positive gap between draft rank and season finish."),
    ("draft_bust", "Highest-drafted player with minimal season contribution."),
    ("reached_and_regretted", "Largest draft reach that underperformed."),
    ("late_round_wizardry", "Best performer drafted in the late rounds."),
    ("bench_war_crime", "Highest-scoring bench player left out."),
    ("set_and_forget", "Player started the most weeks by a manager."),
    ("overthinker", "Games lost due to suboptimal start/sit decisions."),
    ("favorite_player", "Player rostered by the most unique teams."),
    ("emotional_support", "Player started most often by a single manager."),
    ("why_dont_he_want_me", "Most total points scored while on the bench."),
    ("peak_week", "Highest single-week score league-wide."),
    ("rock_bottom", "Lowest single-week score league-wide."),
    ("mid_season_glow_up", "Biggest improvement from first to second half."),
    ("late_season_collapse", "Largest drop-off after midseason."),
    ("looked_better_on_paper", "Largest weekly gap between projected and actual score."),
    ("trust_the_process", "Started slow but still made the playoffs."),
    ("well_get_em_next_year", "Most points scored while missing the playoffs."),
];

pub const UNKNOWN_DESCRIPTION: &str = "Award description unavailable.";

/// Ids that are exported but rendered elsewhere (or not at all).
pub const HIDDEN_INSIGHTS: [&str; 3] = [
    "league_summary",
    "draft_position_champion",
    "average_playoff_cutoff",
];

pub const ALL_AWARDS_AVAILABLE: &str = "All awards available.";

pub fn section_for(id: &str) -> &'static str {
    SECTION_MAP
        .iter()
        .find(|(key, _)| *key == id)
        .map_or(OTHER_SECTION, |(_, section)| section)
}

pub fn description_for(id: &str) -> &'static str {
    AWARD_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == id)
        .map_or(UNKNOWN_DESCRIPTION, |(_, text)| text)
}

pub fn is_hidden(id: &str) -> bool {
    HIDDEN_INSIGHTS.contains(&id)
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Teams.
    Warm,
    /// Players.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub variant: BadgeVariant,
}

/// Presentation of one award.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightCard {
    pub id: String,
    pub title: String,
    pub description: &'static str,
    pub badges: Vec<Badge>,
    pub rows: Vec<MetricEntry>,
}

impl InsightCard {
    pub fn from_insight(insight: &Insight) -> Self {
        let mut badges = Vec::new();
        if let Some(team) = &insight.team {
            badges.push(Badge {
                text: format_team(Some(team)),
                variant: BadgeVariant::Warm,
            });
        }
        if let Some(player) = &insight.player {
            badges.push(Badge {
                text: format_player(Some(player)),
                variant: BadgeVariant::Neutral,
            });
        }
        if !insight.players.is_empty() {
            let names: Vec<String> = insight.players.iter().map(|p| format_player(Some(p))).collect();
            badges.push(Badge {
                text: names.join(" + "),
                variant: BadgeVariant::Neutral,
            });
        }
        for team in &insight.teams {
            badges.push(Badge {
                text: team_label(team.team_name.as_deref(), team.manager_names.as_deref()),
                variant: BadgeVariant::Warm,
            });
        }

        InsightCard {
            id: insight.id.clone(),
            title: insight.title.clone(),
            description: description_for(&insight.id),
            badges,
            rows: metric_entries(insight.metric.as_ref()),
        }
    }
}

/// A named section of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightSection {
    pub name: &'static str,
    pub cards: Vec<InsightCard>,
}

/// Group insights into sections in display order.
///
/// Hidden ids are dropped, empty sections are omitted, and input order is
/// kept within each section.
pub fn group_insights(insights: &[Insight]) -> Vec<InsightSection> {
    let mut buckets: Vec<Vec<InsightCard>> = vec![Vec::new(); SECTION_ORDER.len()];
    for insight in insights.iter().filter(|i| !is_hidden(&i.id)) {
        let section = section_for(&insight.id);
        let idx = SECTION_ORDER
            .iter()
            .position(|name| *name == section)
            .unwrap_or(SECTION_ORDER.len() - 1);
        buckets[idx].push(InsightCard::from_insight(insight));
    }

    SECTION_ORDER
        .iter()
        .zip(buckets)
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(name, cards)| InsightSection { name, cards })
        .collect()
}

/// One line per unavailable award, or a single all-clear line.
pub fn missing_lines(missing: &[MissingInsight]) -> Vec<String> {
    if missing.is_empty() {
        return vec![ALL_AWARDS_AVAILABLE.to_string()];
    }
    missing
        .iter()
        .map(|m| format!("{}: {}", pretty_label(&m.id), m.reason))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
