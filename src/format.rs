//! Date, duration and count formatting shared by the naming rules and
//! the page renderer.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").unwrap()
});

/// Parse the timestamps the API hands back. The current API omits
/// seconds (`2023-03-04T09:00-08:00`), older records carry full
/// RFC 3339, and timestamps without an offset are read as UTC.
pub fn parse_date_time(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Long form used on event and RSVP lines, e.g. `Sat, Mar 4, 2023 9:00 AM`.
pub fn format_date_time(value: Option<&str>) -> String {
    match value {
        None => String::from("Not specified"),
        Some(raw) => match parse_date_time(raw) {
            Some(dt) => dt.format("%a, %b %-d, %Y %-I:%M %p").to_string(),
            None => raw.to_string(),
        },
    }
}

/// Short form used in index listings, e.g. `Sat, Mar 4, 2023`.
pub fn format_date(value: &str) -> String {
    match parse_date_time(value) {
        Some(dt) => dt.format("%a, %b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Event durations arrive either as a number of minutes or as an
/// ISO-8601 duration string depending on which API produced the
/// record.
pub fn format_duration(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let minutes = n.as_f64()?;
            if minutes <= 0.0 {
                return None;
            }
            Some(format!("{} minutes", n))
        }
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(humanize_iso_duration(s).unwrap_or_else(|| s.clone())),
        _ => None,
    }
}

fn humanize_iso_duration(value: &str) -> Option<String> {
    let caps = ISO_DURATION.captures(value.trim())?;
    let units = [(1, "day"), (2, "hour"), (3, "minute"), (4, "second")];
    let parts: Vec<String> = units
        .iter()
        .filter_map(|(idx, unit)| {
            let n: u64 = caps.get(*idx)?.as_str().parse().ok()?;
            (n > 0).then(|| pluralize(n, unit))
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(" "))
}

pub fn pluralize(count: u64, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_parse_date_time_variants() {
        let with_seconds = parse_date_time("2023-03-04T09:00:00Z").unwrap();
        assert_eq!(with_seconds.year(), 2023);

        let without_seconds = parse_date_time("2023-03-04T09:00-08:00").unwrap();
        assert_eq!(without_seconds.day(), 4);
        assert_eq!(without_seconds.offset().local_minus_utc(), -8 * 3600);

        let naive = parse_date_time("2022-12-31T23:30").unwrap();
        assert_eq!(naive.month(), 12);

        assert!(parse_date_time("next tuesday").is_none());
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(
            format_date_time(Some("2023-03-04T09:00-08:00")),
            "Sat, Mar 4, 2023 9:00 AM"
        );
        assert_eq!(format_date_time(None), "Not specified");
        assert_eq!(format_date_time(Some("garbage")), "garbage");
        assert_eq!(format_date("2023-03-04T09:00:00Z"), "Sat, Mar 4, 2023");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&json!(90)), Some(String::from("90 minutes")));
        assert_eq!(
            format_duration(&json!("PT2H30M")),
            Some(String::from("2 hours 30 minutes"))
        );
        assert_eq!(format_duration(&json!("PT1H")), Some(String::from("1 hour")));
        assert_eq!(format_duration(&json!("about an hour")), Some(String::from("about an hour")));
        assert_eq!(format_duration(&json!(0)), None);
        assert_eq!(format_duration(&Value::Null), None);
    }
}
