// Library root: data model, view models, chart geometry, and the season/team
// selection machinery shared by the dashboard front-end and integration tests.

pub mod bracket;
pub mod cache;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod controller;
pub mod format;
pub mod insights;
pub mod location;
pub mod model;
pub mod overview;
pub mod selection;
pub mod source;
pub mod store;
pub mod summary;
pub mod theme;
