//! Small text rendering helpers shared by the pages.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub fn error_message(message: &str) -> String {
    format!("Error: {message}")
}

pub fn loading(text: &str) -> String {
    format!("{text}...")
}

/// `[Label]` when enabled, `[Label] (disabled)` otherwise.
pub fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label}] (disabled)")
    }
}

pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

const INPUT_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Interpret an operator-entered date-time (`2030-05-01T09:00`) in `tz`.
///
/// Returns `None` for unparsable input and for local times skipped by a
/// DST transition; ambiguous times resolve to the earlier instant.
pub fn parse_local_input<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn parses_minute_and_second_precision() {
        let a = parse_local_input("2030-05-01T09:00", &Utc).unwrap();
        let b = parse_local_input("2030-05-01 09:00:00", &Utc).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rfc3339(), "2030-05-01T09:00:00+00:00");
    }

    #[test]
    fn applies_the_time_zone_offset() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let instant = parse_local_input("2030-05-01T09:00", &tz).unwrap();
        assert_eq!(instant, parse_local_input("2030-05-01T06:00", &Utc).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_local_input("tomorrow", &Utc).is_none());
        assert!(parse_local_input("", &Utc).is_none());
    }

    #[test]
    fn disabled_button_is_marked() {
        assert_eq!(button("Create user", true), "[Create user]");
        assert_eq!(button("Create user", false), "[Create user] (disabled)");
    }
}
