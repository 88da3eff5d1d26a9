// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Hero (4 rows): league, season, generated, badge  |
// +----------------+---------------------------------+
// | Seasons        | Tabs (1 row)                    |
// +----------------+---------------------------------+
// | Teams          | Main Panel                      |
// |                |                                 |
// +----------------+                                 |
// | Themes (5)     |                                 |
// +----------------+---------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the sidebar column.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// League name, season, generation time and team badge.
    pub hero: Rect,
    /// Sidebar top: season list.
    pub seasons: Rect,
    /// Sidebar middle: team picker and its note.
    pub teams: Rect,
    /// Sidebar bottom: theme list.
    pub themes: Rect,
    pub tabs: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: hero(4) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let hero = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(middle);

    let sidebar = horizontal[0];
    let content = horizontal[1];

    // Sidebar: seasons (30%) | teams (fill) | themes (5)
    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(5),
            Constraint::Length(5),
        ])
        .split(sidebar);

    let content_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(content);

    AppLayout {
        hero,
        seasons: sidebar_sections[0],
        teams: sidebar_sections[1],
        themes: sidebar_sections[2],
        tabs: content_sections[0],
        main_panel: content_sections[1],
        help_bar,
    }
}
