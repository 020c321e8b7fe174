/// HTML fragments for the dashboard pages
use crate::domain::{CardView, MissionSummary, PreviousView, SourceBadge, UpcomingView, ViewKind};
use crate::filters::{FilterState, OptionSets, SortOrder, ALL};

const NO_UPCOMING: &str = "No upcoming launches found.";
const NO_MATCHES: &str = "No launches found matching your criteria.";
const NO_SITE_HISTORY: &str = "No previous launches found for this site.";

/// Minimal HTML escape for text and attribute positions.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One launch card fragment.
pub fn launch_card(idx: usize, card: &CardView, view: ViewKind) -> String {
    let r = &card.record;
    let mut out = format!(
        concat!(
            "<div class=\"launch-card\">",
            "<h2 class=\"launch-name\">{name}</h2>",
            "<span class=\"status-badge {status_class}\">{status}</span>",
            "<div class=\"launch-detail\"><strong>Launch Time:</strong> <span>{time}</span></div>",
            "<div class=\"launch-detail\"><strong>Provider:</strong> <span>{provider}</span></div>",
            "<div class=\"launch-detail\"><strong>Location:</strong> <span>{location}</span></div>",
        ),
        name = esc(&r.name),
        status_class = r.status_class.css(),
        status = esc(&r.status_label),
        time = esc(&r.formatted_time),
        provider = esc(&r.provider),
        location = esc(&r.location),
    );

    match view {
        ViewKind::Upcoming => {
            out.push_str(&mission_section(idx, card));
            if let Some(url) = &r.calendar_url {
                out.push_str(&format!(
                    "<a class=\"calendar-btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Add to Calendar</a>",
                    esc(url)
                ));
            }
            out.push_str(&format!(
                concat!(
                    "<button class=\"compare-btn\" data-location-id=\"{id}\" data-launch-name=\"{name}\">",
                    "Find Past Launches from this Site</button>",
                    "<button class=\"share-btn\" data-card=\"{idx}\">Share</button>",
                ),
                id = esc(r.location_id.as_deref().unwrap_or_default()),
                name = esc(&r.name),
                idx = idx,
            ));
        }
        ViewKind::Previous => {
            out.push_str(&format!(
                "<div class=\"launch-detail\"><strong>Mission Type:</strong> <span>{}</span></div>",
                esc(&r.mission_type)
            ));
        }
    }

    out.push_str("</div>");
    out
}

fn mission_section(idx: usize, card: &CardView) -> String {
    match &card.record.summary {
        MissionSummary::Plain(text) => format!(
            "<div class=\"mission-description\"><strong>Mission:</strong><p>{}</p></div>",
            esc(text)
        ),
        MissionSummary::Expandable { short, full } => {
            let (short_style, full_style) = if card.expanded {
                (" style=\"display: none;\"", "")
            } else {
                ("", " style=\"display: none;\"")
            };
            format!(
                concat!(
                    "<div class=\"mission-description\"><strong>Mission:</strong>",
                    "<p class=\"mission-text-short\"{}>{}</p>",
                    "<p class=\"mission-text-full\"{}>{}</p>",
                    "<a href=\"#\" class=\"toggle-mission-btn\" data-card=\"{}\">{}</a>",
                    "</div>",
                ),
                short_style,
                esc(short),
                full_style,
                esc(full),
                idx,
                card.toggle_label(),
            )
        }
    }
}

/// The always-first card echoing the mission a site comparison came from.
pub fn source_card(source: &SourceBadge) -> String {
    format!(
        concat!(
            "<div class=\"launch-card source-card\" data-location-id=\"{id}\">",
            "<button class=\"source-card-reset-btn\" id=\"source-card-reset-btn\">X</button>",
            "<h2 class=\"launch-name\">Source Mission:</h2>",
            "<h3>{name}</h3>",
            "<p>Showing past launches from this site only.</p>",
            "<p>Click X to view all previous launches.</p>",
            "</div>",
        ),
        id = esc(&source.location_id),
        name = esc(&source.name),
    )
}

/// Static card linking to the previous-launches view; rendered in the
/// empty and error states too, so navigation is never lost.
pub fn nav_card() -> String {
    "<a href=\"/previous\" class=\"nav-image-button launch-card\"><span>Explore Past Missions</span></a>"
        .to_string()
}

fn empty_message(text: &str) -> String {
    format!("<p class=\"empty-message\">{text}</p>")
}

/// Card list markup for a set of cards.
pub fn cards_markup(cards: &[CardView], view: ViewKind) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| launch_card(i, c, view))
        .collect()
}

/// Container contents for the upcoming view.
pub fn upcoming_content(view: &UpcomingView) -> String {
    if view.cards.is_empty() {
        format!("{}{}", nav_card(), empty_message(NO_UPCOMING))
    } else {
        format!("{}{}", cards_markup(&view.cards, ViewKind::Upcoming), nav_card())
    }
}

/// Container contents for the previous view, including the source-card
/// empty-state rules.
pub fn previous_content(view: &PreviousView) -> String {
    let cards = cards_markup(&view.cards, ViewKind::Previous);
    match (&view.source, view.cards.is_empty()) {
        (Some(src), true) => format!("{}{}", source_card(src), empty_message(NO_SITE_HISTORY)),
        (Some(src), false) => format!("{}{}", source_card(src), cards),
        (None, true) => empty_message(NO_MATCHES),
        (None, false) => cards,
    }
}

fn select_control(id: &str, name: &str, label: &str, options: &[String], selected: &str) -> String {
    let mut opts = format!(
        "<option value=\"all\"{}>All</option>",
        if selected == ALL { " selected" } else { "" }
    );
    for o in options {
        let sel = if o == selected { " selected" } else { "" };
        opts.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", esc(o), sel));
    }
    format!(
        "<label for=\"{id}\">{label}</label><select id=\"{id}\" name=\"{name}\">{opts}</select>"
    )
}

/// Filter bar for the previous view. Preset navigation parameters ride
/// along as hidden inputs so they keep precedence across resubmissions.
pub fn filter_controls(
    options: &OptionSets,
    filters: &FilterState,
    preset_location: Option<&str>,
) -> String {
    let location_selected = preset_location.unwrap_or(filters.location.query_value());
    let (desc_sel, asc_sel) = match filters.sort {
        SortOrder::Desc => (" selected", ""),
        SortOrder::Asc => ("", " selected"),
    };
    let mut hidden = String::new();
    if let Some(id) = &filters.preset_location_id {
        hidden.push_str(&format!(
            "<input type=\"hidden\" name=\"filter_location_id\" value=\"{}\">",
            esc(id)
        ));
    }
    if let Some(name) = &filters.source_mission {
        hidden.push_str(&format!(
            "<input type=\"hidden\" name=\"source_launch_name\" value=\"{}\">",
            esc(name)
        ));
    }
    format!(
        concat!(
            "<form id=\"filter-bar\" method=\"get\" action=\"/previous\">",
            "{hidden}",
            "{provider}",
            "{mission_type}",
            "{location}",
            "<label for=\"sort-date\">Sort by Date</label>",
            "<select id=\"sort-date\" name=\"sort\">",
            "<option value=\"desc\"{desc_sel}>Most Recent</option>",
            "<option value=\"asc\"{asc_sel}>Oldest First</option>",
            "</select>",
            "<button type=\"submit\">Apply</button>",
            "<a id=\"reset-filter-btn\" href=\"/previous\">Reset</a>",
            "</form>",
        ),
        hidden = hidden,
        provider = select_control(
            "filter-provider",
            "provider",
            "Provider",
            &options.providers,
            filters.provider.query_value(),
        ),
        mission_type = select_control(
            "filter-mission-type",
            "mission_type",
            "Mission Type",
            &options.mission_types,
            filters.mission_type.query_value(),
        ),
        location = select_control(
            "filter-location",
            "location",
            "Location",
            &options.locations,
            location_selected,
        ),
        desc_sel = desc_sel,
        asc_sel = asc_sel,
    )
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{} - Space Mission Tracker</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><h1>Space Mission Tracker</h1></header>
<main>
{}
</main>
</body>
</html>"#,
        esc(title),
        body
    )
}

/// Full upcoming dashboard page.
pub fn upcoming_page(view: &UpcomingView) -> String {
    page_shell(
        "Upcoming Launches",
        &format!(
            concat!(
                "<div id=\"last-update\">Last updated: {}</div>",
                "<div id=\"launches-container\" class=\"launches-grid\">{}</div>",
            ),
            esc(&view.last_update),
            upcoming_content(view),
        ),
    )
}

/// Full previous dashboard page.
pub fn previous_page(view: &PreviousView) -> String {
    page_shell(
        "Previous Launches",
        &format!(
            "{}<div id=\"launches-container\" class=\"launches-grid\">{}</div>",
            filter_controls(&view.options, &view.filters, view.selected_location.as_deref()),
            previous_content(view),
        ),
    )
}

/// Persistent error indicator page; navigation stays alive.
pub fn error_page(message: &str) -> String {
    page_shell(
        "Launch Tracker",
        &format!(
            concat!(
                "<div id=\"error\" class=\"error-banner\">{}</div>",
                "<div id=\"launches-container\" class=\"launches-grid\">{}</div>",
            ),
            esc(message),
            nav_card(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayRecord, StatusClass};

    fn display(name: &str) -> DisplayRecord {
        DisplayRecord {
            name: name.to_string(),
            status_label: "Go for Launch".to_string(),
            status_class: StatusClass::Go,
            formatted_time: "January 15, 2024, 10:30 UTC".to_string(),
            provider: "SpaceX".to_string(),
            location: "Cape Canaveral".to_string(),
            location_id: Some("12".to_string()),
            mission_type: "Communications".to_string(),
            summary: MissionSummary::Plain("A mission.".to_string()),
            calendar_url: Some("https://calendar.google.com/calendar/render?a=1&b=2".to_string()),
            share_text: "share".to_string(),
            sort_key: 0,
        }
    }

    fn upcoming_view(cards: Vec<CardView>) -> UpcomingView {
        UpcomingView {
            cards,
            last_update: "January 15, 2024, 10:30 UTC".to_string(),
        }
    }

    fn previous_view(cards: Vec<CardView>, source: Option<SourceBadge>) -> PreviousView {
        PreviousView {
            cards,
            options: OptionSets::default(),
            filters: FilterState::default(),
            selected_location: None,
            source,
        }
    }

    #[test]
    fn test_esc_covers_markup_characters() {
        assert_eq!(esc("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_upcoming_card_carries_compare_data_attributes() {
        let html = launch_card(0, &CardView::new(display("Starlink 42")), ViewKind::Upcoming);
        assert!(html.contains("data-location-id=\"12\""));
        assert!(html.contains("data-launch-name=\"Starlink 42\""));
        assert!(html.contains("status-go"));
        assert!(html.contains("Add to Calendar"));
    }

    #[test]
    fn test_previous_card_shows_mission_type_without_compare() {
        let html = launch_card(0, &CardView::new(display("Starlink 42")), ViewKind::Previous);
        assert!(html.contains("Mission Type:"));
        assert!(html.contains("Communications"));
        assert!(!html.contains("compare-btn"));
        assert!(!html.contains("share-btn"));
    }

    #[test]
    fn test_expandable_mission_renders_both_texts() {
        let mut record = display("X");
        record.summary = MissionSummary::Expandable {
            short: "short...".to_string(),
            full: "the full text".to_string(),
        };
        let collapsed = CardView::new(record.clone());
        let html = launch_card(0, &collapsed, ViewKind::Upcoming);
        assert!(html.contains("mission-text-short\">short..."));
        assert!(html.contains("mission-text-full\" style=\"display: none;\""));
        assert!(html.contains(">Read More<"));

        let expanded = CardView {
            record,
            expanded: true,
        };
        let html = launch_card(0, &expanded, ViewKind::Upcoming);
        assert!(html.contains("mission-text-short\" style=\"display: none;\""));
        assert!(html.contains(">Show Less<"));
    }

    #[test]
    fn test_empty_upcoming_keeps_navigation_but_no_cards() {
        let html = upcoming_page(&upcoming_view(Vec::new()));
        assert!(html.contains(NO_UPCOMING));
        assert!(html.contains("Explore Past Missions"));
        assert!(!html.contains("status-badge"));
    }

    #[test]
    fn test_upcoming_with_results_appends_nav_card() {
        let html = upcoming_page(&upcoming_view(vec![CardView::new(display("A"))]));
        assert!(html.contains("status-badge"));
        assert!(html.contains("Explore Past Missions"));
        assert!(!html.contains(NO_UPCOMING));
    }

    #[test]
    fn test_error_page_keeps_navigation() {
        let html = error_page("network or decode failure: boom");
        assert!(html.contains("error-banner"));
        assert!(html.contains("Explore Past Missions"));
    }

    #[test]
    fn test_previous_empty_without_source_uses_generic_message() {
        let html = previous_page(&previous_view(Vec::new(), None));
        assert!(html.contains(NO_MATCHES));
        assert!(!html.contains("source-card"));
    }

    #[test]
    fn test_previous_empty_with_source_shows_one_source_card_and_site_message() {
        let source = SourceBadge {
            name: "Starlink 42".to_string(),
            location_id: "12".to_string(),
        };
        let html = previous_page(&previous_view(Vec::new(), Some(source)));
        assert_eq!(html.matches("launch-card source-card").count(), 1);
        assert!(html.contains(NO_SITE_HISTORY));
        assert!(!html.contains(NO_MATCHES));
        assert!(html.contains("Starlink 42"));
    }

    #[test]
    fn test_filter_controls_preselect_preset_location() {
        let options = OptionSets {
            providers: vec!["SpaceX".to_string()],
            mission_types: vec!["Communications".to_string()],
            locations: vec!["Cape Canaveral".to_string(), "Kourou".to_string()],
        };
        let filters = FilterState {
            preset_location_id: Some("12".to_string()),
            source_mission: Some("Starlink 42".to_string()),
            ..Default::default()
        };
        let html = filter_controls(&options, &filters, Some("Cape Canaveral"));
        assert!(html.contains("<option value=\"Cape Canaveral\" selected>"));
        assert!(html.contains("name=\"filter_location_id\" value=\"12\""));
        assert!(html.contains("name=\"source_launch_name\" value=\"Starlink 42\""));
    }
}
