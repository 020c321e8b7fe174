/// Domain models for the launch dashboard
use crate::filters::{FilterState, OptionSets};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One collection response from the collaborator API. The record list is
/// replaced wholesale on every fetch; nothing is diffed or merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchCollection {
    #[serde(default)]
    pub results: Vec<LaunchRecord>,
    #[serde(default)]
    pub cached_timestamp: Option<String>,
}

/// Raw launch record as the API ships it. Every field is optional; the
/// normalizer owns the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchRecord {
    pub name: Option<String>,
    pub status: Option<LaunchStatus>,
    pub window_start: Option<String>,
    pub net: Option<String>,
    pub launch_service_provider: Option<Provider>,
    pub pad: Option<Pad>,
    pub mission: Option<Mission>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchStatus {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Provider {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pad {
    pub location: Option<PadLocation>,
}

/// Pad location; the id arrives as either a number or a string upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PadLocation {
    pub id: Option<Value>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mission {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Which dashboard a record is being prepared for. The two views reuse the
/// same display buckets with different classification semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Upcoming,
    Previous,
}

/// Display bucket derived from a status or outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Go,
    Tbd,
    Hold,
}

impl StatusClass {
    pub fn css(self) -> &'static str {
        match self {
            StatusClass::Go => "status-go",
            StatusClass::Tbd => "status-tbd",
            StatusClass::Hold => "status-hold",
        }
    }
}

/// Mission description, truncated when it would overflow a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionSummary {
    Plain(String),
    Expandable { short: String, full: String },
}

impl MissionSummary {
    pub fn is_expandable(&self) -> bool {
        matches!(self, MissionSummary::Expandable { .. })
    }
}

/// Display-safe record, immutable once built.
#[derive(Debug, Clone)]
pub struct DisplayRecord {
    pub name: String,
    pub status_label: String,
    pub status_class: StatusClass,
    pub formatted_time: String,
    pub provider: String,
    pub location: String,
    pub location_id: Option<String>,
    pub mission_type: String,
    pub summary: MissionSummary,
    pub calendar_url: Option<String>,
    pub share_text: String,
    pub sort_key: i64,
}

/// One rendered card plus its expand state.
#[derive(Debug, Clone)]
pub struct CardView {
    pub record: DisplayRecord,
    pub expanded: bool,
}

impl CardView {
    pub fn new(record: DisplayRecord) -> Self {
        Self {
            record,
            expanded: false,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Show Less"
        } else {
            "Read More"
        }
    }
}

/// Assembled state for the upcoming-launches page.
#[derive(Debug, Clone)]
pub struct UpcomingView {
    pub cards: Vec<CardView>,
    pub last_update: String,
}

/// Assembled state for the previous-launches page.
#[derive(Debug, Clone)]
pub struct PreviousView {
    pub cards: Vec<CardView>,
    pub options: OptionSets,
    pub filters: FilterState,
    pub selected_location: Option<String>,
    pub source: Option<SourceBadge>,
}

/// Echo of the mission that initiated a site-filtered previous view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBadge {
    pub name: String,
    pub location_id: String,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
