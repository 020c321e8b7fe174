/// Shared parsing helpers
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Parse a launch timestamp, trying RFC 3339 first and then the API's plain form.
pub fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    None
}

/// Millisecond sort key for a launch time. Unparsable input takes the
/// numeric floor so the record still participates in ordering.
pub fn sort_key(s: &str) -> i64 {
    parse_ts(s)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(i64::MIN)
}

/// Render a JSON id (string or number) as a query-friendly string.
pub fn id_string(v: &Value) -> Option<String> {
    if let Some(s) = v.as_str() {
        if !s.is_empty() {
            return Some(s.to_string());
        }
    } else if v.is_number() {
        return Some(v.to_string());
    }
    None
}
