/// Pure presentation formatters
use crate::utils::parse_ts;
use chrono::{DateTime, Duration, Utc};

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";

/// Render a parsed instant as the long date/time used across both pages.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y, %H:%M UTC").to_string()
}

/// Render a launch timestamp, or the literal "TBD" when the input is
/// absent or unparsable. The date formatter is never invoked in that case.
pub fn format_timestamp(ts: &str) -> String {
    match parse_ts(ts) {
        Some(dt) => format_datetime(&dt),
        None => "TBD".to_string(),
    }
}

/// UTC basic ISO form the calendar service expects: no separators, no
/// fractional seconds.
fn calendar_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build an add-to-calendar URL for a launch. The event window is exactly
/// 60 minutes; None when the start time cannot be parsed.
pub fn build_calendar_link(
    title: &str,
    start: &str,
    description: &str,
    location: &str,
) -> Option<String> {
    let start_dt = parse_ts(start)?;
    let end_dt = start_dt + Duration::minutes(60);
    Some(format!(
        "{}&text={}&dates={}/{}&details={}&location={}",
        CALENDAR_BASE,
        urlencoding::encode(title),
        calendar_stamp(&start_dt),
        calendar_stamp(&end_dt),
        urlencoding::encode(description),
        urlencoding::encode(location),
    ))
}

/// One shareable sentence. The page URL rides inside the text body itself
/// so share targets that only honor a text field still include the link.
pub fn build_share_text(name: &str, provider: &str, formatted_time: &str, page_url: &str) -> String {
    format!("{name} by {provider} is scheduled for {formatted_time}. Track it at {page_url}")
}
