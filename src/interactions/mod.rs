/// Delegated interaction dispatch for the rendered pages
use crate::domain::{CardView, ViewKind};
use crate::errors::ApiError;
use crate::filters::FilterState;
use std::time::Duration;

/// How long the clipboard confirmation label stays up before reverting.
pub const SHARE_CONFIRM_WINDOW: Duration = Duration::from_secs(2);

pub const SHARE_IDLE_LABEL: &str = "Share";
pub const SHARE_CONFIRM_LABEL: &str = "Link Copied!";

const LOCATION_MISSING_WARNING: &str =
    "Location data is missing for this launch. Cannot filter past missions.";
const CLIPBOARD_FAILED_WARNING: &str = "Unable to copy the share link.";
const SHARE_UNSUPPORTED_WARNING: &str = "Sharing is not supported on this device.";

/// Visible consequences of one dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Full navigation to a new page URL.
    Navigate(String),
    /// User-visible warning; the page stays put.
    Warn(String),
    /// The container's contents must be rendered again.
    Rerender,
    /// Issue the filtered fetch again.
    Refetch,
    /// Restore the share control's label once the confirmation window
    /// elapses.
    RevertShareLabelAfter(Duration),
}

/// The clicked element as the delegated listener sees it: class list plus
/// data attributes. Unrelated targets carry none of the known classes and
/// fall through the dispatch with no effects.
#[derive(Debug, Clone, Default)]
pub struct ClickTarget {
    pub classes: Vec<String>,
    pub location_id: Option<String>,
    pub launch_name: Option<String>,
    pub card: Option<usize>,
}

impl ClickTarget {
    pub fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Events the page dispatches on. One delegated listener set per page.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Click(ClickTarget),
    FilterChange,
    Reset,
}

/// Disposition of a native share attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user cancelled the platform sheet; benign, not an error.
    Dismissed,
}

/// Platform capabilities behind the share fallback chain
/// (native, then clipboard, then unsupported).
pub trait SharePlatform {
    fn has_native_share(&self) -> bool;
    fn has_clipboard(&self) -> bool;
    fn native_share(&self, text: &str) -> Result<ShareOutcome, ApiError>;
    fn clipboard_write(&self, text: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePhase {
    Idle,
    Sharing,
}

/// Per-page interaction state: card expand flags, filter selections and
/// the share control. Constructed once per rendered page; re-rendering
/// the container never orphans it.
pub struct PageController {
    pub view: ViewKind,
    pub cards: Vec<CardView>,
    pub filters: FilterState,
    pub share_phase: SharePhase,
    pub share_label: String,
}

impl PageController {
    pub fn new(view: ViewKind, cards: Vec<CardView>, filters: FilterState) -> Self {
        Self {
            view,
            cards,
            filters,
            share_phase: SharePhase::Idle,
            share_label: SHARE_IDLE_LABEL.to_string(),
        }
    }

    /// Dispatch one event. Each behavior is guarded by a class-name check
    /// on the target, so clicks on anything else are ignored.
    pub fn dispatch<P: SharePlatform>(&mut self, event: &UiEvent, platform: &P) -> Vec<Effect> {
        match event {
            UiEvent::Click(target) => {
                if target.has_class("toggle-mission-btn") {
                    self.toggle_mission(target)
                } else if target.has_class("compare-btn") {
                    self.compare(target)
                } else if target.has_class("share-btn") {
                    self.share(target, platform)
                } else if target.has_class("source-card-reset-btn") {
                    vec![Effect::Navigate("/previous".to_string())]
                } else {
                    Vec::new()
                }
            }
            UiEvent::FilterChange => vec![Effect::Refetch],
            UiEvent::Reset => self.reset(),
        }
    }

    fn toggle_mission(&mut self, target: &ClickTarget) -> Vec<Effect> {
        let Some(card) = target.card.and_then(|i| self.cards.get_mut(i)) else {
            return Vec::new();
        };
        if !card.record.summary.is_expandable() {
            return Vec::new();
        }
        card.expanded = !card.expanded;
        vec![Effect::Rerender]
    }

    fn compare(&self, target: &ClickTarget) -> Vec<Effect> {
        match self.compare_url(target) {
            Ok(url) => vec![Effect::Navigate(url)],
            Err(_) => vec![Effect::Warn(LOCATION_MISSING_WARNING.to_string())],
        }
    }

    fn compare_url(&self, target: &ClickTarget) -> Result<String, ApiError> {
        let location_id = target
            .location_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ApiError::MissingRequiredData("no location to filter by".to_string())
            })?;
        let name = target.launch_name.as_deref().unwrap_or_default();
        Ok(format!(
            "/previous?filter_location_id={}&source_launch_name={}",
            urlencoding::encode(location_id),
            urlencoding::encode(name),
        ))
    }

    /// Share fallback chain: native, then clipboard, then unsupported.
    fn share<P: SharePlatform>(&mut self, target: &ClickTarget, platform: &P) -> Vec<Effect> {
        if self.share_phase == SharePhase::Sharing {
            return Vec::new();
        }
        let Some(text) = target
            .card
            .and_then(|i| self.cards.get(i))
            .map(|c| c.record.share_text.clone())
        else {
            return Vec::new();
        };

        if platform.has_native_share() {
            self.share_phase = SharePhase::Sharing;
            let result = platform.native_share(&text);
            self.share_phase = SharePhase::Idle;
            match result {
                // A dismissal is the user changing their mind; stay silent.
                Ok(_) => Vec::new(),
                Err(err) => vec![Effect::Warn(err.to_string())],
            }
        } else if platform.has_clipboard() {
            match platform.clipboard_write(&text) {
                Ok(()) => {
                    self.share_label = SHARE_CONFIRM_LABEL.to_string();
                    vec![
                        Effect::Rerender,
                        Effect::RevertShareLabelAfter(SHARE_CONFIRM_WINDOW),
                    ]
                }
                Err(_) => vec![Effect::Warn(CLIPBOARD_FAILED_WARNING.to_string())],
            }
        } else {
            vec![Effect::Warn(SHARE_UNSUPPORTED_WARNING.to_string())]
        }
    }

    /// Called when the confirmation window elapses.
    pub fn restore_share_label(&mut self) {
        self.share_label = SHARE_IDLE_LABEL.to_string();
    }

    fn reset(&mut self) -> Vec<Effect> {
        if self.filters.has_preset() {
            // Discard all navigation parameters and reload the view fresh.
            vec![Effect::Navigate("/previous".to_string())]
        } else {
            self.filters.reset();
            vec![Effect::Refetch]
        }
    }
}
