use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};

/// Parse a payload timestamp.
///
/// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date
/// (midnight UTC).
pub fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time);
    }
    let utc = FixedOffset::east_opt(0)?;
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(DateTime::from_naive_utc_and_offset(naive, utc))
}

pub fn minutes_since_midnight(time: &DateTime<FixedOffset>) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minutes since Monday 00:00 in the time's own offset.
pub fn minutes_since_week_start(time: &DateTime<FixedOffset>) -> u32 {
    time.weekday().num_days_from_monday() * 1440 + minutes_since_midnight(time)
}

/// Date line of the commit tooltip, e.g. "January 01, 2020".
pub fn format_commit_date(time: &DateTime<FixedOffset>) -> String {
    time.format("%B %d, %Y").to_string()
}
