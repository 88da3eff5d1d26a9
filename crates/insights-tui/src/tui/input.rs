// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (tabs, team cursor, chart
// tooltip, scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use insights_core::chart::Point;

use super::ViewState;
use crate::protocol::{TabId, UserCommand};

/// Lines moved per PgUp/PgDn.
pub const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows emits both Press and Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        KeyCode::Left | KeyCode::Char('h') => Some(UserCommand::StepSeason(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserCommand::StepSeason(1)),

        KeyCode::Up | KeyCode::Char('k') => {
            view_state.team_cursor = view_state.team_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = view_state.team_rows() - 1;
            view_state.team_cursor = (view_state.team_cursor + 1).min(last);
            None
        }
        KeyCode::Enter => select_under_cursor(view_state),
        KeyCode::Char('a') => {
            view_state.team_cursor = 0;
            Some(UserCommand::SelectTeam(None))
        }

        KeyCode::Char('t') => Some(UserCommand::CycleTheme),

        KeyCode::Char('1') => switch_tab(view_state, TabId::Overview),
        KeyCode::Char('2') => switch_tab(view_state, TabId::Awards),
        KeyCode::Char('3') => switch_tab(view_state, TabId::Standings),

        KeyCode::Char('[') => step_marker(view_state, -1),
        KeyCode::Char(']') => step_marker(view_state, 1),
        KeyCode::Esc => {
            view_state.tooltip.hide();
            None
        }

        KeyCode::PageDown => {
            let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
            *offset += PAGE_SIZE;
            None
        }
        KeyCode::PageUp => {
            let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
            *offset = offset.saturating_sub(PAGE_SIZE);
            None
        }

        _ => None,
    }
}

fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    view_state.active_tab = tab;
    None
}

/// Enter on the team picker. Disabled entries do nothing.
fn select_under_cursor(view_state: &ViewState) -> Option<UserCommand> {
    if view_state.team_cursor == 0 {
        return Some(UserCommand::SelectTeam(None));
    }
    let entry = view_state
        .dashboard
        .team_choices
        .entries
        .get(view_state.team_cursor - 1)?;
    entry
        .enabled
        .then(|| UserCommand::SelectTeam(Some(entry.team_key.clone())))
}

/// Move the chart tooltip to the previous (`-1`) or next (`1`) marker.
/// With no tooltip showing, `]` starts at the first marker and `[` at the
/// last.
fn step_marker(view_state: &mut ViewState, direction: isize) -> Option<UserCommand> {
    let layout = view_state.dashboard.trend.layout()?;
    let count = layout.markers.len();
    if count == 0 {
        return None;
    }
    let idx = match view_state.tooltip.marker {
        Some(current) if direction < 0 => current.saturating_sub(1),
        Some(current) => (current + 1).min(count - 1),
        None if direction < 0 => count - 1,
        None => 0,
    };
    let center = layout.markers[idx].center;
    view_state.tooltip.show(layout, idx, center, Point::ORIGIN);
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
