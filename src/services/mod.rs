/// Page controller services for the two dashboards
use crate::clients::LaunchClient;
use crate::domain::{
    CardView, LaunchRecord, PreviousView, SourceBadge, UpcomingView, ViewKind,
};
use crate::errors::ApiResult;
use crate::filters::{preset_location_name, FilterState, OptionSets};
use crate::format::{format_datetime, format_timestamp};
use crate::normalize::normalize;
use crate::utils::parse_ts;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

struct Snapshot {
    records: Vec<LaunchRecord>,
    cached_timestamp: Option<String>,
    fetched_at: DateTime<Utc>,
}

/// Upcoming-launches page controller. Holds the latest collection, which
/// each fetch replaces wholesale.
pub struct UpcomingService {
    client: LaunchClient,
    page_url: String,
    generation: AtomicU64,
    snapshot: RwLock<Option<Snapshot>>,
}

impl UpcomingService {
    pub fn new(client: LaunchClient, page_url: String) -> Self {
        Self {
            client,
            page_url,
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(None),
        }
    }

    /// Fetch a fresh collection. Each fetch carries a generation tag;
    /// a response that lost the race against a newer fetch is discarded
    /// instead of overwriting the displayed collection.
    pub async fn refresh(&self) -> ApiResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let collection = self.client.fetch_upcoming().await?;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale upcoming fetch (generation {generation})");
            return Ok(());
        }
        let snapshot = Snapshot {
            records: collection.results,
            cached_timestamp: collection.cached_timestamp,
            fetched_at: Utc::now(),
        };
        *self.snapshot.write().await = Some(snapshot);
        Ok(())
    }

    pub async fn has_snapshot(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Build the page view from the current snapshot.
    pub async fn view(&self) -> Option<UpcomingView> {
        let guard = self.snapshot.read().await;
        guard.as_ref().map(|s| {
            build_upcoming_view(
                &s.records,
                s.cached_timestamp.as_deref(),
                s.fetched_at,
                &self.page_url,
            )
        })
    }
}

/// Assemble the upcoming view from a fetched collection.
pub fn build_upcoming_view(
    records: &[LaunchRecord],
    cached_timestamp: Option<&str>,
    fetched_at: DateTime<Utc>,
    page_url: &str,
) -> UpcomingView {
    let cards = records
        .iter()
        .map(|r| CardView::new(normalize(r, ViewKind::Upcoming, page_url)))
        .collect();
    // Prefer the backend's cache timestamp for "last updated"; fall back
    // to the fetch time when it is missing or unreadable.
    let last_update = match cached_timestamp {
        Some(ts) if parse_ts(ts).is_some() => format_timestamp(ts),
        _ => format_datetime(&fetched_at),
    };
    UpcomingView { cards, last_update }
}

/// Previous-launches page controller. The held collection backs location
/// name-to-id resolution; option sets rebuild when a fresh base
/// (unfiltered) collection loads.
pub struct PreviousService {
    client: LaunchClient,
    page_url: String,
    held: RwLock<Vec<LaunchRecord>>,
    options: RwLock<OptionSets>,
}

impl PreviousService {
    pub fn new(client: LaunchClient, page_url: String) -> Self {
        Self {
            client,
            page_url,
            held: RwLock::new(Vec::new()),
            options: RwLock::new(OptionSets::default()),
        }
    }

    /// Issue the server-side filtered fetch for the given filter state and
    /// assemble the page view. The fetched collection replaces the held
    /// one wholesale.
    pub async fn load(&self, filters: FilterState) -> ApiResult<PreviousView> {
        let query = {
            let held = self.held.read().await;
            filters.to_query(&held)
        };
        let collection = self.client.fetch_previous(&query).await?;
        let records = collection.results;

        {
            let mut options = self.options.write().await;
            if query.is_unfiltered() || options.is_empty() {
                *options = OptionSets::collect(&records);
            }
        }
        let options = self.options.read().await.clone();

        let selected_location = filters
            .preset_location_id
            .as_deref()
            .and_then(|id| preset_location_name(&records, id));

        *self.held.write().await = records.clone();

        Ok(build_previous_view(
            &records,
            filters,
            options,
            selected_location,
            &self.page_url,
        ))
    }
}

/// Assemble the previous view: normalize, apply the local mission-type
/// filter, sort, and attach the source badge when the page was entered
/// through a site comparison.
pub fn build_previous_view(
    records: &[LaunchRecord],
    filters: FilterState,
    options: OptionSets,
    selected_location: Option<String>,
    page_url: &str,
) -> PreviousView {
    let display = records
        .iter()
        .map(|r| normalize(r, ViewKind::Previous, page_url))
        .collect();
    let mut display = filters.apply_local(display);
    crate::filters::sort_records(&mut display, filters.sort);
    let cards = display.into_iter().map(CardView::new).collect();

    let source = filters.source_mission.clone().map(|name| SourceBadge {
        name,
        location_id: filters.preset_location_id.clone().unwrap_or_default(),
    });

    PreviousView {
        cards,
        options,
        filters,
        selected_location,
        source,
    }
}
