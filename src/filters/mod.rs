/// Filter/sort state and collaborator query construction
use crate::domain::{DisplayRecord, LaunchRecord};
use crate::utils::id_string;
use std::collections::{BTreeSet, HashMap};

/// Sentinel the collaborator understands as "no filter".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        if s == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    One(String),
}

impl Selection {
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == ALL {
            Selection::All
        } else {
            Selection::One(s.to_string())
        }
    }

    pub fn query_value(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::One(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Current filter selections plus the seed values read once from incoming
/// navigation parameters. Owned by the page controller for the session.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub provider: Selection,
    pub location: Selection,
    pub mission_type: Selection,
    pub sort: SortOrder,
    pub preset_location_id: Option<String>,
    pub source_mission: Option<String>,
}

impl FilterState {
    /// Read filter selections and navigation seeds from page query
    /// parameters.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let pick = |key: &str| {
            params
                .get(key)
                .map(|s| Selection::parse(s))
                .unwrap_or_default()
        };
        FilterState {
            provider: pick("provider"),
            location: pick("location"),
            mission_type: pick("mission_type"),
            sort: params
                .get("sort")
                .map(|s| SortOrder::parse(s))
                .unwrap_or_default(),
            preset_location_id: params
                .get("filter_location_id")
                .filter(|s| !s.is_empty())
                .cloned(),
            source_mission: params
                .get("source_launch_name")
                .filter(|s| !s.is_empty())
                .cloned(),
        }
    }

    /// Whether any preset navigation parameter is active. Resetting then
    /// means a full navigation, not a local state mutation.
    pub fn has_preset(&self) -> bool {
        self.preset_location_id.is_some() || self.source_mission.is_some()
    }

    /// Restore every dropdown to "all" and the sort to most-recent-first.
    pub fn reset(&mut self) {
        self.provider = Selection::All;
        self.location = Selection::All;
        self.mission_type = Selection::All;
        self.sort = SortOrder::Desc;
    }

    /// Build the server-side filter query. The dropdown's location name is
    /// resolved to an id against the currently-held collection, because
    /// the collaborator keys on id; a preset id from navigation always
    /// wins for the current view generation.
    pub fn to_query(&self, held: &[LaunchRecord]) -> PreviousQuery {
        let mut location_id = match &self.location {
            Selection::All => ALL.to_string(),
            Selection::One(name) => {
                resolve_location_id(held, name).unwrap_or_else(|| ALL.to_string())
            }
        };
        if let Some(preset) = &self.preset_location_id {
            location_id = preset.clone();
        }
        PreviousQuery {
            provider: self.query_provider(),
            location_id,
        }
    }

    fn query_provider(&self) -> String {
        self.provider.query_value().to_string()
    }

    /// Keep the records the local mission-type selection admits.
    pub fn apply_local(&self, records: Vec<DisplayRecord>) -> Vec<DisplayRecord> {
        match &self.mission_type {
            Selection::All => records,
            Selection::One(kind) => records
                .into_iter()
                .filter(|r| r.mission_type == *kind)
                .collect(),
        }
    }
}

/// Query parameters the collaborator applies server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousQuery {
    pub provider: String,
    pub location_id: String,
}

impl PreviousQuery {
    /// True when the fetch this query produces is the full base
    /// collection.
    pub fn is_unfiltered(&self) -> bool {
        self.provider == ALL && self.location_id == ALL
    }
}

fn resolve_location_id(records: &[LaunchRecord], name: &str) -> Option<String> {
    records.iter().find_map(|r| {
        let loc = r.pad.as_ref()?.location.as_ref()?;
        if loc.name.as_deref() == Some(name) {
            loc.id.as_ref().and_then(id_string)
        } else {
            None
        }
    })
}

/// Resolve a preset location id back to a display name, for dropdown
/// pre-selection.
pub fn preset_location_name(records: &[LaunchRecord], preset_id: &str) -> Option<String> {
    records.iter().find_map(|r| {
        let loc = r.pad.as_ref()?.location.as_ref()?;
        if loc.id.as_ref().and_then(id_string).as_deref() == Some(preset_id) {
            loc.name.clone()
        } else {
            None
        }
    })
}

/// Deduplicated, alphabetically sorted dropdown options. Rebuilt whole
/// whenever a fresh base collection loads, never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub providers: Vec<String>,
    pub mission_types: Vec<String>,
    pub locations: Vec<String>,
}

impl OptionSets {
    pub fn collect(records: &[LaunchRecord]) -> Self {
        let mut providers = BTreeSet::new();
        let mut mission_types = BTreeSet::new();
        let mut locations = BTreeSet::new();
        for r in records {
            if let Some(name) = r.launch_service_provider.as_ref().and_then(|p| p.name.clone()) {
                providers.insert(name);
            }
            if let Some(kind) = r.mission.as_ref().and_then(|m| m.kind.clone()) {
                mission_types.insert(kind);
            }
            if let Some(name) = r
                .pad
                .as_ref()
                .and_then(|p| p.location.as_ref())
                .and_then(|l| l.name.clone())
            {
                locations.insert(name);
            }
        }
        Self {
            providers: providers.into_iter().collect(),
            mission_types: mission_types.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.mission_types.is_empty() && self.locations.is_empty()
    }
}

/// Stable sort by launch time; unparsable dates keep their numeric floor
/// and are never excluded.
pub fn sort_records(records: &mut [DisplayRecord], order: SortOrder) {
    match order {
        SortOrder::Asc => records.sort_by(|a, b| a.sort_key.cmp(&b.sort_key)),
        SortOrder::Desc => records.sort_by(|a, b| b.sort_key.cmp(&a.sort_key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewKind;
    use crate::normalize::normalize;
    use serde_json::json;

    fn record(value: serde_json::Value) -> LaunchRecord {
        serde_json::from_value(value).expect("fixture deserializes")
    }

    fn held_collection() -> Vec<LaunchRecord> {
        vec![
            record(json!({
                "name": "A",
                "launch_service_provider": {"name": "SpaceX"},
                "pad": {"location": {"id": 12, "name": "Cape Canaveral"}}
            })),
            record(json!({
                "name": "B",
                "launch_service_provider": {"name": "Rocket Lab"},
                "pad": {"location": {"id": 27, "name": "Mahia Peninsula"}}
            })),
        ]
    }

    fn display(name: &str, time: &str, mission_type: &str) -> DisplayRecord {
        let raw = record(json!({
            "name": name,
            "window_start": time,
            "mission": {"type": mission_type}
        }));
        normalize(&raw, ViewKind::Previous, "http://localhost/")
    }

    #[test]
    fn test_to_query_resolves_location_name_to_id() {
        let filters = FilterState {
            location: Selection::One("Mahia Peninsula".to_string()),
            ..Default::default()
        };
        let query = filters.to_query(&held_collection());
        assert_eq!(query.location_id, "27");
        assert_eq!(query.provider, "all");
    }

    #[test]
    fn test_to_query_unknown_location_falls_back_to_all() {
        let filters = FilterState {
            location: Selection::One("Nowhere".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_query(&held_collection()).location_id, "all");
    }

    #[test]
    fn test_to_query_preset_overrides_dropdown() {
        let filters = FilterState {
            location: Selection::One("Mahia Peninsula".to_string()),
            preset_location_id: Some("12".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_query(&held_collection()).location_id, "12");
    }

    #[test]
    fn test_preset_location_name_resolution() {
        let held = held_collection();
        assert_eq!(
            preset_location_name(&held, "12").as_deref(),
            Some("Cape Canaveral")
        );
        assert_eq!(preset_location_name(&held, "99"), None);
    }

    #[test]
    fn test_from_params_defaults_and_seeds() {
        let mut params = HashMap::new();
        params.insert("filter_location_id".to_string(), "12".to_string());
        params.insert("source_launch_name".to_string(), "Starlink 42".to_string());
        let filters = FilterState::from_params(&params);
        assert!(filters.provider.is_all());
        assert_eq!(filters.sort, SortOrder::Desc);
        assert_eq!(filters.preset_location_id.as_deref(), Some("12"));
        assert_eq!(filters.source_mission.as_deref(), Some("Starlink 42"));
        assert!(filters.has_preset());
    }

    #[test]
    fn test_reset_restores_all_and_desc() {
        let mut filters = FilterState {
            provider: Selection::One("SpaceX".to_string()),
            location: Selection::One("Cape Canaveral".to_string()),
            mission_type: Selection::One("Communications".to_string()),
            sort: SortOrder::Asc,
            ..Default::default()
        };
        filters.reset();
        assert!(filters.provider.is_all());
        assert!(filters.location.is_all());
        assert!(filters.mission_type.is_all());
        assert_eq!(filters.sort, SortOrder::Desc);
    }

    #[test]
    fn test_apply_local_mission_type() {
        let filters = FilterState {
            mission_type: Selection::One("Communications".to_string()),
            ..Default::default()
        };
        let records = vec![
            display("A", "2024-01-15T10:30:00Z", "Communications"),
            display("B", "2024-01-16T10:30:00Z", "Test Flight"),
        ];
        let kept = filters.apply_local(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "A");
    }

    #[test]
    fn test_sort_asc_then_desc_reverses() {
        let mut records = vec![
            display("Mid", "2024-02-01T00:00:00Z", "X"),
            display("Late", "2024-03-01T00:00:00Z", "X"),
            display("Early", "2024-01-01T00:00:00Z", "X"),
        ];
        sort_records(&mut records, SortOrder::Asc);
        let asc: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
        assert_eq!(asc, ["Early", "Mid", "Late"]);

        sort_records(&mut records, SortOrder::Desc);
        let desc: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
        assert_eq!(desc, ["Late", "Mid", "Early"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut records = vec![
            display("First", "2024-01-15T10:30:00Z", "X"),
            display("Second", "2024-01-15T10:30:00Z", "X"),
        ];
        sort_records(&mut records, SortOrder::Asc);
        assert_eq!(records[0].name, "First");
        sort_records(&mut records, SortOrder::Desc);
        assert_eq!(records[0].name, "First");
    }

    #[test]
    fn test_sort_keeps_unparsable_dates() {
        let mut records = vec![
            display("Dated", "2024-01-15T10:30:00Z", "X"),
            display("Undated", "TBD", "X"),
        ];
        sort_records(&mut records, SortOrder::Asc);
        assert_eq!(records[0].name, "Undated");
        sort_records(&mut records, SortOrder::Desc);
        assert_eq!(records[1].name, "Undated");
    }

    #[test]
    fn test_option_sets_dedup_and_sort() {
        let records = vec![
            record(json!({
                "launch_service_provider": {"name": "SpaceX"},
                "mission": {"type": "Communications"},
                "pad": {"location": {"id": 1, "name": "Cape Canaveral"}}
            })),
            record(json!({
                "launch_service_provider": {"name": "Arianespace"},
                "mission": {"type": "Communications"},
                "pad": {"location": {"id": 2, "name": "Kourou"}}
            })),
            record(json!({
                "launch_service_provider": {"name": "SpaceX"},
                "mission": {"type": "Test Flight"}
            })),
        ];
        let options = OptionSets::collect(&records);
        assert_eq!(options.providers, ["Arianespace", "SpaceX"]);
        assert_eq!(options.mission_types, ["Communications", "Test Flight"]);
        assert_eq!(options.locations, ["Cape Canaveral", "Kourou"]);
    }

    #[test]
    fn test_query_unfiltered_detection() {
        let all = FilterState::default().to_query(&[]);
        assert!(all.is_unfiltered());
        let filtered = PreviousQuery {
            provider: "SpaceX".to_string(),
            location_id: ALL.to_string(),
        };
        assert!(!filtered.is_unfiltered());
    }
}
