// Navigable query state (`season=2024&...`).
//
// The active season is mirrored here after every successful season load so
// that a restart or a shared query string reopens the same season.

use std::fmt;

pub const SEASON_PARAM: &str = "season";

/// Ordered query parameters. Keys are unique; `set` replaces in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    params: Vec<(String, String)>,
}

impl Location {
    /// Parse `?a=1&b=2`, `a=1&b=2`, or an empty string. Pairs without `=`
    /// become keys with an empty value; later duplicates are dropped.
    pub fn parse(query: &str) -> Self {
        let mut location = Location::default();
        let query = query.trim().trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key.is_empty() || location.get(key).is_some() {
                continue;
            }
            location.params.push((key.to_string(), value.to_string()));
        }
        location
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    /// The requested season, if any.
    pub fn season(&self) -> Option<&str> {
        self.get(SEASON_PARAM).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.to_query_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
