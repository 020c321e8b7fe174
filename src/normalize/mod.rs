/// Raw-record normalization into display-safe records
use crate::domain::{DisplayRecord, LaunchRecord, MissionSummary, StatusClass, ViewKind};
use crate::format::{build_calendar_link, build_share_text, format_timestamp};
use crate::utils::{id_string, sort_key};

/// Descriptions longer than this get the expand affordance.
pub const SUMMARY_LIMIT: usize = 200;

const DEFAULT_NAME: &str = "Unknown Mission";
const DEFAULT_STATUS: &str = "Unknown";
const DEFAULT_TIME: &str = "TBD";
const DEFAULT_PROVIDER: &str = "Unknown Provider";
const DEFAULT_LOCATION: &str = "Unknown Location";
const DEFAULT_DESCRIPTION: &str = "No mission description available.";
const DEFAULT_MISSION_TYPE: &str = "Unknown";

/// Map a raw, partially-optional record into a display-safe record. Total:
/// every missing field takes its documented default, except the location
/// id, whose absence must propagate so comparison actions can detect it.
pub fn normalize(raw: &LaunchRecord, view: ViewKind, page_url: &str) -> DisplayRecord {
    let name = raw
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let status_label = raw
        .status
        .as_ref()
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let time = raw
        .window_start
        .clone()
        .or_else(|| raw.net.clone())
        .unwrap_or_else(|| DEFAULT_TIME.to_string());
    let provider = raw
        .launch_service_provider
        .as_ref()
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    let location = raw
        .pad
        .as_ref()
        .and_then(|p| p.location.as_ref())
        .and_then(|l| l.name.clone())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let location_id = raw
        .pad
        .as_ref()
        .and_then(|p| p.location.as_ref())
        .and_then(|l| l.id.as_ref())
        .and_then(id_string);
    let description = raw
        .mission
        .as_ref()
        .and_then(|m| m.description.clone())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let mission_type = raw
        .mission
        .as_ref()
        .and_then(|m| m.kind.clone())
        .unwrap_or_else(|| DEFAULT_MISSION_TYPE.to_string());

    let formatted_time = format_timestamp(&time);

    DisplayRecord {
        status_class: classify(view, &status_label),
        calendar_url: build_calendar_link(&name, &time, &description, &location),
        share_text: build_share_text(&name, &provider, &formatted_time, page_url),
        summary: summarize(&description),
        sort_key: sort_key(&time),
        name,
        status_label,
        formatted_time,
        provider,
        location,
        location_id,
        mission_type,
    }
}

/// Pick the display bucket for a label. The two views carry independent
/// tables: readiness for upcoming, outcome for previous.
pub fn classify(view: ViewKind, label: &str) -> StatusClass {
    let lower = label.to_lowercase();
    match view {
        ViewKind::Upcoming => {
            if lower.contains("go") {
                StatusClass::Go
            } else if lower.contains("tbd") || lower.contains("to be") {
                StatusClass::Tbd
            } else {
                StatusClass::Hold
            }
        }
        ViewKind::Previous => {
            if lower.contains("success") {
                StatusClass::Go
            } else if lower.contains("failure") {
                StatusClass::Hold
            } else {
                StatusClass::Tbd
            }
        }
    }
}

/// Truncate long descriptions, keeping the full text for the expand
/// affordance. Counted in characters, not bytes.
pub fn summarize(description: &str) -> MissionSummary {
    if description.chars().count() > SUMMARY_LIMIT {
        let short: String = description.chars().take(SUMMARY_LIMIT).collect();
        MissionSummary::Expandable {
            short: format!("{short}..."),
            full: description.to_string(),
        }
    } else {
        MissionSummary::Plain(description.to_string())
    }
}
