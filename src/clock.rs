use chrono::{Duration, NaiveTime};

/// Add a whole number of hours to a time-of-day.
///
/// `NaiveTime` addition wraps around midnight, so an evening start plus a
/// long session lands back in the early morning with no day marker.
pub fn add_hours(start: NaiveTime, hours: i64) -> NaiveTime {
    start + Duration::hours(hours)
}

/// Render a time-of-day on the 12-hour clock with zero-padded minutes and
/// an AM/PM suffix, e.g. `09:00 AM` or `01:30 PM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Render a start/end pair, e.g. `09:00 AM - 10:00 AM`.
pub fn format_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_clock(start), format_clock(end))
}
