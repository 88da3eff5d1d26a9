// End-to-end tests for catalog loading, season resolution, and the
// season/team selection flow, driven from the on-disk fixture documents.

use std::path::PathBuf;
use std::sync::Arc;

use insights_core::bracket::overview_brackets;
use insights_core::cache::LoadStatus;
use insights_core::catalog::Catalog;
use insights_core::chart::{trend_series, SparklineLayout, GRIDLINE_COUNT};
use insights_core::controller::{Controller, SeasonOutcome};
use insights_core::insights::{group_insights, missing_lines};
use insights_core::location::Location;
use insights_core::model::SeasonId;
use insights_core::overview::{overview_cards, TrendCard};
use insights_core::source::{DirSource, MemorySource, INDEX_PATH};
use insights_core::store::PreferenceStore;
use insights_core::summary::{summary_lines, Medal};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

async fn open(location: Location) -> Controller {
    let source = Arc::new(DirSource::new(fixtures()));
    let catalog = Catalog::load(source.as_ref()).await.expect("fixtures should load");
    Controller::new(source, catalog, location)
}

#[tokio::test]
async fn defaults_to_latest_season() {
    let ctl = open(Location::default()).await;
    assert_eq!(ctl.initial_season(), Some(SeasonId::from("2024")));
}

#[tokio::test]
async fn unknown_requested_season_falls_back_to_latest() {
    let ctl = open(Location::parse("?season=1999")).await;
    assert_eq!(ctl.initial_season(), Some(SeasonId::from("2024")));

    let ctl = open(Location::parse("?season=2023")).await;
    assert_eq!(ctl.initial_season(), Some(SeasonId::from("2023")));
}

#[tokio::test]
async fn empty_index_has_no_season() {
    let source = MemorySource::new()
        .with_json(INDEX_PATH, serde_json::json!({ "seasons": [] }))
        .with_json("leagues.json", serde_json::json!([]))
        .with_json("teams.json", serde_json::json!([]))
        .with_json("league_summary.json", serde_json::json!([]))
        .with_json("league_overview.json", serde_json::json!([]));
    let catalog = Catalog::load(&source).await.unwrap();
    let ctl = Controller::new(Arc::new(source), catalog, Location::default());
    assert_eq!(ctl.initial_season(), None);
}

#[tokio::test]
async fn full_season_and_team_flow() {
    let mut ctl = open(Location::default()).await;
    let s2024 = ctl.initial_season().unwrap();

    let SeasonOutcome::Loaded { team_load: Some(ticket) } = ctl.select_season(&s2024).await.unwrap()
    else {
        panic!("first load should issue a team ticket");
    };
    assert_eq!(ctl.location().to_query_string(), "season=2024");

    // Season view: hidden ids dropped, unknown ids land in "Other".
    let view = ctl.view();
    assert!(view.show_summary);
    let sections = group_insights(view.insights);
    let names: Vec<&str> = sections.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Performance & Results", "Start/Sit Decisions", "Other"]);
    assert_eq!(missing_lines(view.missing), vec!["Trade Machine: No trades were recorded."]);

    // Team picker is disabled until the team document arrives.
    let choices = ctl.team_choices();
    assert_eq!(choices.entries.len(), 3);
    assert!(choices.entries.iter().all(|c| !c.enabled));

    assert!(ctl.run_team_load(ticket).await);
    assert_eq!(ctl.team_status(&s2024), LoadStatus::Loaded);
    let choices = ctl.team_choices();
    let labels: Vec<&str> = choices.entries.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["bye week heroes (Alex)", "Gridiron Ghosts (Sam)"]);

    ctl.select_team(Some("449.l.5150.t.2")).unwrap();
    let view = ctl.view();
    assert!(!view.show_summary);
    assert!(view.insights.is_empty());
    assert_eq!(
        missing_lines(view.missing),
        vec!["Draft Steal: Draft results unavailable."]
    );
    assert_eq!(
        view.team_badge().as_deref(),
        Some("Team View • bye week heroes (Alex)")
    );

    // Switching seasons clears the team; 2023 has no team document.
    let s2023 = SeasonId::from("2023");
    let outcome = ctl.select_season(&s2023).await.unwrap();
    let SeasonOutcome::Loaded { team_load: Some(ticket) } = outcome else {
        panic!("2023 should issue its own ticket");
    };
    assert_eq!(ctl.selection().current_team(), None);
    assert!(ctl.run_team_load(ticket).await);
    assert_eq!(ctl.team_status(&s2023), LoadStatus::Missing);
    assert!(ctl.select_team(Some("423.l.5150.t.1")).is_err());
    assert_eq!(
        ctl.team_choices().note,
        "Team insights are not available for this season."
    );

    // Returning to 2024 reuses the cached team insights.
    let back = ctl.select_season(&s2024).await.unwrap();
    assert_eq!(back, SeasonOutcome::Loaded { team_load: None });
    ctl.select_team(Some("449.l.5150.t.1")).unwrap();
    assert_eq!(ctl.view().insights[0].id, "peak_week");
}

#[tokio::test]
async fn overview_view_models_from_fixtures() {
    let ctl = open(Location::default()).await;
    let catalog = ctl.catalog();
    let s2024 = SeasonId::from("2024");
    let overview = catalog.overview_for(&s2024);

    let cards = overview_cards(overview);
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[1].rows[1].value, "6 (25%)");

    let TrendCard::Chart { layout, low, high } = TrendCard::from_overview(overview) else {
        panic!("trend should chart");
    };
    assert_eq!(low, "Low: 80");
    assert_eq!(high, "High: 110");
    assert_eq!(layout.gridlines.len(), GRIDLINE_COUNT);
    assert!(layout.bounds.lower <= 70.0 && layout.bounds.upper >= 120.0);
    assert_eq!(layout.bounds.lower % 10.0, 0.0);
    assert_eq!(layout.bounds.upper % 10.0, 0.0);
    assert_eq!(layout.markers.len(), 4);
    assert!(layout
        .markers
        .windows(2)
        .all(|pair| pair[0].center.x < pair[1].center.x));

    let brackets = overview_brackets(overview, catalog.placements_for(&s2024));
    assert_eq!(brackets.len(), 1);
    let line = &brackets[0].rounds[0].matchups[0][0];
    assert_eq!(line.placement.as_deref(), Some("Champion"));

    let lines = summary_lines(catalog.summary_for(&s2024), catalog.placements_for(&s2024));
    assert_eq!(lines[0].team_name, "Gridiron Ghosts");
    assert_eq!(lines[0].medal, Some(Medal::Gold));
    assert_eq!(lines[2].rank, "—");

    // 2023 has no overview record.
    let s2023 = SeasonId::from("2023");
    assert_eq!(overview_cards(catalog.overview_for(&s2023)).len(), 1);
    assert!(overview_brackets(catalog.overview_for(&s2023), None).is_empty());
}

#[test]
fn trend_scenario_bounds() {
    let trend: Vec<_> = [80.0, 95.0, 110.0, 105.0]
        .iter()
        .enumerate()
        .map(|(i, v)| insights_core::model::TrendPoint {
            week: Some(i as i64 + 1),
            avg_points: Some(*v),
        })
        .collect();
    let (values, hints) = trend_series(&trend);
    let layout = SparklineLayout::compute(&values, &hints).unwrap();
    assert_eq!(layout.x_ticks.len(), 4);
    assert_eq!(layout.x_ticks[0].text, "W1");
}

#[tokio::test]
async fn location_persists_across_sessions() {
    let store = PreferenceStore::open(":memory:").unwrap();
    let mut ctl = open(store.location().unwrap()).await;
    let season = SeasonId::from("2023");
    ctl.select_season(&season).await.unwrap();
    store.save_location(ctl.location()).unwrap();

    let reopened = open(store.location().unwrap()).await;
    assert_eq!(reopened.initial_season(), Some(season));
}
