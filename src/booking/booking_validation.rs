//! Validation for manually entered bookings.
//
// Unlike the import path, manual entry is strict: every problem with a draft
// is collected and reported together in a single message.

use super::BookingError;
use super::booking_types::{EventDraft, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid time regex"));

/// Validate date string has format YYYY-MM-DD
pub fn validate_date_format(date: &str) -> bool {
    DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok()
}

/// Validate time string has format HH:MM
pub fn validate_time_format(time: &str) -> bool {
    TIME_RE.is_match(time) && NaiveTime::parse_from_str(time, TIME_FORMAT).is_ok()
}

/// Check a draft and return its parsed date, start and end.
pub fn validate_draft(draft: &EventDraft) -> Result<(NaiveDate, NaiveTime, NaiveTime), BookingError> {
    let mut problems = Vec::new();

    if draft.supplier_name.trim().is_empty() {
        problems.push("Supplier is required".to_string());
    }
    if draft.service.trim().is_empty() {
        problems.push("Service is required".to_string());
    }
    if draft.client_name.trim().is_empty() {
        problems.push("Client is required".to_string());
    }

    let date = draft.date.trim();
    let date = if validate_date_format(date) {
        NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
    } else {
        problems.push(format!("Invalid date '{}'. Expected YYYY-MM-DD", draft.date));
        None
    };

    let mut parse_time = |label: &str, raw: &str| {
        let raw = raw.trim();
        if validate_time_format(raw) {
            NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
        } else {
            problems.push(format!("Invalid {} '{}'. Expected HH:MM", label, raw));
            None
        }
    };
    let start = parse_time("start time", &draft.start_time);
    let end = parse_time("end time", &draft.end_time);

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            problems.push("End time must be after start time".to_string());
        }
    }

    match (date, start, end) {
        (Some(date), Some(start), Some(end)) if problems.is_empty() => Ok((date, start, end)),
        _ => Err(BookingError::Validation(problems)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::EventStatus;
    use pretty_assertions::assert_eq;

    fn draft() -> EventDraft {
        EventDraft {
            supplier_name: "Ana".to_string(),
            service: "Kayak".to_string(),
            client_name: "Smith".to_string(),
            date: "2024-06-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "11:00".to_string(),
            pax: 2,
            status: EventStatus::Booked,
        }
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("2024-06-01"));
        assert!(!validate_date_format("2024-02-30"));
        assert!(!validate_date_format("01/06/2024"));
        assert!(!validate_date_format("2024-6-1"));
    }

    #[test]
    fn test_validate_time_format() {
        assert!(validate_time_format("09:00"));
        assert!(validate_time_format("9:00"));
        assert!(!validate_time_format("24:00"));
        assert!(!validate_time_format("12:60"));
        assert!(!validate_time_format("9am"));
    }

    #[test]
    fn test_valid_draft() {
        let (date, start, end) = validate_draft(&draft()).unwrap();
        assert_eq!(date.to_string(), "2024-06-01");
        assert_eq!(start.format("%H:%M").to_string(), "09:00");
        assert_eq!(end.format("%H:%M").to_string(), "11:00");
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut bad = draft();
        bad.supplier_name = " ".to_string();
        bad.client_name.clear();
        bad.start_time = "11:00".to_string();
        bad.end_time = "10:00".to_string();

        let err = validate_draft(&bad).unwrap_err();
        let BookingError::Validation(problems) = &err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert_eq!(
            problems,
            &vec![
                "Supplier is required".to_string(),
                "Client is required".to_string(),
                "End time must be after start time".to_string(),
            ]
        );
        assert_eq!(
            err.to_string(),
            "Supplier is required; Client is required; End time must be after start time"
        );
    }

    #[test]
    fn test_equal_start_and_end_rejected() {
        let mut bad = draft();
        bad.end_time = "09:00".to_string();
        assert!(validate_draft(&bad).is_err());
    }

    #[test]
    fn test_bad_formats_reported() {
        let mut bad = draft();
        bad.date = "tomorrow".to_string();
        bad.end_time = "late".to_string();
        let BookingError::Validation(problems) = validate_draft(&bad).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("Invalid date 'tomorrow'"));
        assert!(problems[1].contains("Invalid end time 'late'"));
    }
}
