// ── Date normalization ──
//
// The back end stores whatever the form sent, so event bounds come back as
// RFC 3339, naive local-looking strings, bare dates or epoch milliseconds.
// Everything is funnelled into `DateTime<Utc>`; anything else is `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive formats accepted, most specific first. Naive values are taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Shortest digit run read as epoch milliseconds; shorter runs are years or
/// compact dates, not timestamps.
const EPOCH_MS_MIN_DIGITS: usize = 10;

/// Format used by datetime-local form inputs.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a raw bound. Empty, malformed or out-of-range input yields `None`.
pub fn normalize(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    // Bare integers are epoch milliseconds.
    if raw.len() >= EPOCH_MS_MIN_DIGITS && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    None
}

/// Canonical wire form: `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Value for an editable input: `YYYY-MM-DDTHH:MM`.
pub fn to_input_value(dt: &DateTime<Utc>) -> String {
    dt.format(INPUT_FORMAT).to_string()
}
