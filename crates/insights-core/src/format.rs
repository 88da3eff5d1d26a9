// Display formatting for raw JSON values, teams, players, and numbers.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::model::{PlayerRef, TeamRef};

/// Placeholder rendered wherever a value is missing.
pub const DASH: &str = "—";

/// Turn an identifier such as `points_for` into `Points For`.
pub fn pretty_label(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_word = false;
    for ch in value.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_alphanumeric();
        if is_word && !prev_is_word {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}

/// Integers print bare, everything else with two decimals.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Shortest textual form of a number, as the exports would print it.
pub fn format_plain(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn format_percent(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", digits, v * 100.0),
        None => DASH.to_string(),
    }
}

/// Points with two decimals, or a dash.
pub fn format_points(value: Option<f64>) -> String {
    value.map_or_else(|| DASH.to_string(), |v| format!("{v:.2}"))
}

pub fn format_optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| DASH.to_string(), format_number)
}

/// `Name (Managers)`, falling back to `Unknown` for the name.
pub fn team_label(name: Option<&str>, managers: Option<&str>) -> String {
    let name = non_empty(name).unwrap_or("Unknown");
    match non_empty(managers) {
        Some(m) => format!("{name} ({m})"),
        None => name.to_string(),
    }
}

pub fn format_team(team: Option<&TeamRef>) -> String {
    match team {
        Some(t) => team_label(t.team_name.as_deref(), t.manager_names.as_deref()),
        None => DASH.to_string(),
    }
}

pub fn player_label(name: Option<&str>, position: Option<&str>) -> String {
    let name = non_empty(name).unwrap_or("Unknown");
    match non_empty(position) {
        Some(p) => format!("{name} • {p}"),
        None => name.to_string(),
    }
}

pub fn format_player(player: Option<&PlayerRef>) -> String {
    match player {
        Some(p) => player_label(p.player_name.as_deref(), p.player_position.as_deref()),
        None => DASH.to_string(),
    }
}

/// Render an arbitrary metric value on a single line.
///
/// Team- and player-shaped objects get their dedicated labels; any other
/// object is flattened recursively as `Key: Value` pairs joined with ` • `.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => DASH.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(map) => {
            if is_team_shaped(value) {
                team_label(str_field(map.get("team_name")), str_field(map.get("manager_names")))
            } else if is_truthy(map.get("player_name")) || is_truthy(map.get("player_position")) {
                player_label(
                    str_field(map.get("player_name")),
                    str_field(map.get("player_position")),
                )
            } else {
                map.iter()
                    .map(|(key, nested)| format!("{}: {}", pretty_label(key), format_value(nested)))
                    .collect::<Vec<_>>()
                    .join(" • ")
            }
        }
    }
}

/// One label/value row of an insight's metric listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    pub label: String,
    pub value: String,
    /// The value is a team reference (rendered with emphasis).
    pub is_team: bool,
}

/// Flatten a metric mapping into display rows, in document order.
pub fn metric_entries(metric: Option<&Value>) -> Vec<MetricEntry> {
    let Some(Value::Object(map)) = metric else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| MetricEntry {
            label: pretty_label(key),
            value: format_value(value),
            is_team: value.is_object() && is_team_shaped(value),
        })
        .collect()
}

/// Human-readable generation timestamp.
pub fn format_generated_at(raw: Option<&str>) -> String {
    let Some(raw) = non_empty(raw) else {
        return DASH.to_string();
    };
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M %:z").to_string();
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn str_field(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn is_team_shaped(value: &Value) -> bool {
    is_truthy(value.get("team_name")) || is_truthy(value.get("manager_names"))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_label_capitalizes_words() {
        assert_eq!(pretty_label("points_for"), "Points For");
        assert_eq!(pretty_label("avg_points"), "Avg Points");
        assert_eq!(pretty_label("already Fine"), "Already Fine");
        assert_eq!(pretty_label(""), "");
    }

    #[test]
    fn format_number_integers_and_decimals() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(101.456), "101.46");
        assert_eq!(format_number(-3.5), "-3.50");
    }

    #[test]
    fn format_percent_handles_missing() {
        assert_eq!(format_percent(Some(0.256), 1), "25.6%");
        assert_eq!(format_percent(Some(0.5), 0), "50%");
        assert_eq!(format_percent(None, 1), DASH);
    }

    #[test]
    fn team_and_player_labels() {
        let team = TeamRef {
            team_key: None,
            team_name: Some("Gridiron Gang".into()),
            manager_names: Some("Sam".into()),
        };
        assert_eq!(format_team(Some(&team)), "Gridiron Gang (Sam)");
        assert_eq!(format_team(None), DASH);
        assert_eq!(team_label(None, None), "Unknown");

        let player = PlayerRef {
            player_name: Some("Jalen Hurts".into()),
            player_position: Some("QB".into()),
        };
        assert_eq!(format_player(Some(&player)), "Jalen Hurts • QB");
        assert_eq!(player_label(Some("Solo"), Some("")), "Solo");
    }

    #[test]
    fn format_value_flattens_nested_objects() {
        let value = json!({ "week": 3, "margin": 0.42, "opponent": { "team_name": "Beta" } });
        assert_eq!(format_value(&value), "Week: 3 • Margin: 0.42 • Opponent: Beta");
    }

    #[test]
    fn format_value_arrays_and_nulls() {
        assert_eq!(format_value(&json!([1, 2.5, "x"])), "1, 2.50, x");
        assert_eq!(format_value(&Value::Null), DASH);
        assert_eq!(
            format_value(&json!({ "player_name": "Puka", "player_position": "WR" })),
            "Puka • WR"
        );
    }

    #[test]
    fn metric_entries_flags_team_values() {
        let metric = json!({
            "avg_points": 121.5,
            "team": { "team_name": "Alpha", "manager_names": "Kim" },
            "weeks": [1, 2]
        });
        let entries = metric_entries(Some(&metric));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "Avg Points");
        assert_eq!(entries[0].value, "121.50");
        assert!(!entries[0].is_team);
        assert_eq!(entries[1].value, "Alpha (Kim)");
        assert!(entries[1].is_team);
        assert_eq!(entries[2].value, "1, 2");
    }

    #[test]
    fn metric_entries_ignores_non_objects() {
        assert!(metric_entries(None).is_empty());
        assert!(metric_entries(Some(&json!(12))).is_empty());
    }

    #[test]
    fn generated_at_parses_pipeline_timestamp() {
        assert_eq!(
            format_generated_at(Some("2025-01-06 18:04:11")),
            "2025-01-06 18:04"
        );
        assert_eq!(format_generated_at(Some("last tuesday")), "last tuesday");
        assert_eq!(format_generated_at(None), DASH);
    }
}
