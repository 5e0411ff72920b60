//! Value parsers for imported booking rows.
//
// Formats are tried in a fixed order and the first success wins. Ambiguous
// dates such as `03/04/2024` therefore always read as day/month/year; no locale
// inference is attempted.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Date formats, in trial order.
pub const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Time formats, in trial order.
pub const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%H%M"];

// chrono's %Y takes a year of any width; a two-digit year must not become year 0024.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{1,2}-\d{1,2})$").expect("valid date shape regex")
});

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if !DATE_SHAPE.is_match(s) {
        return None;
    }
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    TIME_FORMATS.iter().find_map(|fmt| {
        if *fmt == "%H%M" {
            parse_bare_digits(s)
        } else {
            NaiveTime::parse_from_str(s, fmt).ok()
        }
    })
}

/// `0930` or `930`. Spreadsheets store HHMM as a number, which loses the leading zero.
fn parse_bare_digits(s: &str) -> Option<NaiveTime> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.len() {
        3 => NaiveTime::parse_from_str(&format!("0{}", s), "%H%M").ok(),
        4 => NaiveTime::parse_from_str(s, "%H%M").ok(),
        _ => None,
    }
}

/// Coerce a traveller count. Decimals truncate; anything non-numeric or negative is 0.
pub fn parse_pax(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_ambiguous_date_reads_day_first() {
        // Known limitation: 03/04/2024 is always 3 April, never 4 March.
        assert_eq!(parse_date("03/04/2024"), Some(date(2024, 4, 3)));
    }

    #[test_case("2024-06-01", 2024, 6, 1 ; "iso")]
    #[test_case("  01/06/2024 ", 2024, 6, 1 ; "day first with whitespace")]
    #[test_case("12/25/2024", 2024, 12, 25 ; "month first when day first is invalid")]
    #[test_case("1/6/2024", 2024, 6, 1 ; "unpadded")]
    fn test_parse_date(raw: &str, y: i32, m: u32, d: u32) {
        assert_eq!(parse_date(raw), Some(date(y, m, d)));
    }

    #[test_case("" ; "empty")]
    #[test_case("13/25/2024" ; "no valid reading")]
    #[test_case("June 1st" ; "words")]
    #[test_case("2024/06/01" ; "slashed iso")]
    #[test_case("01/06/24" ; "two digit year day first")]
    #[test_case("24-06-01" ; "two digit year iso")]
    #[test_case("1/6/202" ; "three digit year")]
    #[test_case("01/06/20245" ; "five digit year")]
    fn test_parse_date_rejects(raw: &str) {
        assert_eq!(parse_date(raw), None);
    }

    #[test_case("09:00", 9, 0 ; "hh mm")]
    #[test_case("9:05", 9, 5 ; "unpadded hour")]
    #[test_case("14:30:00", 14, 30 ; "with seconds")]
    #[test_case("02:15 PM", 14, 15 ; "twelve hour pm")]
    #[test_case("12:00 AM", 0, 0 ; "midnight")]
    #[test_case("0930", 9, 30 ; "bare digits")]
    #[test_case("930", 9, 30 ; "bare digits without leading zero")]
    #[test_case("2359", 23, 59 ; "bare digits late")]
    #[test_case(" 17:45 ", 17, 45 ; "trimmed")]
    fn test_parse_time(raw: &str, h: u32, m: u32) {
        assert_eq!(parse_time(raw), Some(time(h, m)));
    }

    #[test_case("" ; "empty")]
    #[test_case("25:00" ; "hour out of range")]
    #[test_case("morning" ; "words")]
    #[test_case("nan" ; "missing cell marker")]
    #[test_case("93" ; "two bare digits")]
    #[test_case("960" ; "bare minutes out of range")]
    #[test_case("12345" ; "five bare digits")]
    fn test_parse_time_rejects(raw: &str) {
        assert_eq!(parse_time(raw), None);
    }

    #[test_case("4", 4 ; "integer")]
    #[test_case(" 12 ", 12 ; "padded")]
    #[test_case("3.0", 3 ; "float")]
    #[test_case("2.9", 2 ; "truncates")]
    #[test_case("", 0 ; "empty")]
    #[test_case("two", 0 ; "words")]
    #[test_case("-3", 0 ; "negative")]
    #[test_case("NaN", 0 ; "not a number")]
    fn test_parse_pax(raw: &str, expected: u32) {
        assert_eq!(parse_pax(raw), expected);
    }
}
