//! Timestamp derivation from raw `date` and `time` cells.

use chrono::{Datelike, NaiveDateTime};

/// Input format of `"<date> <time>"`, e.g. `05-Jan-21 10:20:30`.
pub const INPUT_FORMAT: &str = "%d-%b-%y %H:%M:%S";

/// Rendering of derived timestamps in output tables.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Two-digit years below this value are in the 2000s, the rest in the 1900s.
const CENTURY_PIVOT: i32 = 69;

/// Parse trimmed `date` and `time` cells joined by a single space.
///
/// Two-digit years 00-68 map to 2000-2068 and 69-99 to 1969-1999.
/// Returns `None` for anything that does not match [`INPUT_FORMAT`]; callers
/// drop those rows.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    let parsed = NaiveDateTime::parse_from_str(&combined, INPUT_FORMAT).ok()?;
    // chrono's %y reads 00-69 as 2000-2069.
    if parsed.year() >= 2000 + CENTURY_PIVOT {
        parsed.with_year(parsed.year() - 100)
    } else {
        Some(parsed)
    }
}

/// Render a timestamp for output.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_two_digit_year() {
        let ts = parse_timestamp("05-Jan-21", "10:20:30").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "2021-01-05 10:20:30");
    }

    #[test]
    fn trims_both_parts() {
        let ts = parse_timestamp("  17-Mar-20 ", " 23:59:59  ").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "2020-03-17 23:59:59");
    }

    #[test]
    fn two_digit_years_pivot_at_69() {
        let ts = parse_timestamp("05-Jan-69", "00:00:00").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "1969-01-05 00:00:00");

        let ts = parse_timestamp("05-Jan-68", "00:00:00").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "2068-01-05 00:00:00");

        let ts = parse_timestamp("05-Jan-99", "00:00:00").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "1999-01-05 00:00:00");

        let ts = parse_timestamp("05-Jan-00", "00:00:00").expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "2000-01-05 00:00:00");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_timestamp("31-Foo-99", "99:99:99").is_none());
        assert!(parse_timestamp("31-Feb-21", "00:00:00").is_none());
        assert!(parse_timestamp("2021-01-05", "10:20:30").is_none());
        assert!(parse_timestamp("", "").is_none());
        assert!(parse_timestamp("05-Jan-21", "").is_none());
    }
}
