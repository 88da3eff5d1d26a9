// Terminal dashboard for precomputed fantasy league insights.
//
// `app` owns the selection controller and reacts to user commands and
// background team-insight loads; `tui` renders the snapshots it pushes.

pub mod app;
pub mod protocol;
pub mod tui;
