//! Relative time formatting

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the naive ISO 8601 forms Python's `isoformat()`
/// produces. The backend writes naive values in its local time, so they are
/// read as wall-clock time of the local zone.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(value, &Local)
}

/// [`parse_timestamp`] with naive values read as wall-clock time in `tz`
pub fn parse_timestamp_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    // Ambiguous wall-clock times (DST fold) take the earlier instant; times
    // inside a DST gap do not exist and fall back to UTC.
    Some(
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    )
}

/// Human-readable age of `timestamp` relative to `now`.
///
/// Buckets: under a minute is "just now", then minutes, hours and days up
/// to a week, after which the calendar date is shown. Empty input yields an
/// empty string and unparseable input is returned unchanged.
pub fn relative_age(timestamp: &str, now: DateTime<Utc>) -> String {
    relative_age_in(timestamp, now, &Local)
}

/// [`relative_age`] for a page whose local zone is `tz`
pub fn relative_age_in<Tz>(timestamp: &str, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if timestamp.is_empty() {
        return String::new();
    }

    let Some(date) = parse_timestamp_in(timestamp, tz) else {
        return timestamp.to_string();
    };

    let seconds = (now - date).num_seconds();
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 7 {
        ago(days, "day")
    } else {
        date.with_timezone(tz).format("%-m/%-d/%Y").to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} ago", count, unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
