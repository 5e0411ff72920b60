//! Core data types for the booking board.
//
// Events are stored with string-encoded dates and times (`YYYY-MM-DD`, `HH:MM`)
// so the JSON state files stay readable and stable across versions.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Booking state of an event. Anything that is not explicitly on hold is booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Booked,
    Hold,
}

impl EventStatus {
    /// Map free-text status values onto the booked/hold vocabulary.
    ///
    /// Only a case-insensitive "hold" substring yields `Hold`. Everything else,
    /// including empty or unrelated text, falls back to `Booked`.
    pub fn normalize(raw: &str) -> Self {
        if raw.to_lowercase().contains("hold") {
            EventStatus::Hold
        } else {
            EventStatus::Booked
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Booked => "booked",
            EventStatus::Hold => "hold",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "booked" => Ok(EventStatus::Booked),
            "hold" => Ok(EventStatus::Hold),
            other => Err(anyhow::anyhow!("Invalid status '{}'. Expected 'booked' or 'hold'", other)),
        }
    }
}

/// One normalized supplier/service booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub supplier_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub client_name: String,
    pub pax: u32,
    pub service: String,
    pub status: EventStatus,
}

impl Event {
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(&self.start_time, TIME_FORMAT).ok()?;
        Some(self.naive_date()?.and_time(time))
    }

    /// End of the event. An end time at or before the start belongs to the next day.
    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        let start = self.start_datetime()?;
        let time = NaiveTime::parse_from_str(&self.end_time, TIME_FORMAT).ok()?;
        let end = start.date().and_time(time);
        if end <= start {
            Some(end + Duration::days(1))
        } else {
            Some(end)
        }
    }

    /// Calendar title, e.g. `Ana — Kayak Tour (Smith Family, 4 pax)`.
    pub fn title(&self) -> String {
        format!(
            "{} — {} ({}, {} pax)",
            self.supplier_name, self.service, self.client_name, self.pax
        )
    }
}

/// Raw input for manual single-row entry or a full-row edit.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub supplier_name: String,
    pub service: String,
    pub client_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub pax: u32,
    pub status: EventStatus,
}

impl EventDraft {
    /// Seed a draft from a stored event, used when editing only some fields.
    pub fn from_event(event: &Event) -> Self {
        Self {
            supplier_name: event.supplier_name.clone(),
            service: event.service.clone(),
            client_name: event.client_name.clone(),
            date: event.date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            pax: event.pax,
            status: event.status,
        }
    }
}

/// Selection criteria for listing and exporting events. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub supplier: Option<String>,
    pub service: Option<String>,
    pub client: Option<String>,
    pub status: Option<EventStatus>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if self.from.is_some() || self.to.is_some() {
            let Some(date) = event.naive_date() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }

        contains_ignore_case(&event.supplier_name, self.supplier.as_deref())
            && contains_ignore_case(&event.service, self.service.as_deref())
            && contains_ignore_case(&event.client_name, self.client.as_deref())
    }
}

fn contains_ignore_case(value: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn sample_event() -> Event {
        Event {
            event_id: "E2024060109000000".to_string(),
            supplier_name: "Ana".to_string(),
            date: "2024-06-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "13:30".to_string(),
            client_name: "Smith Family".to_string(),
            pax: 4,
            service: "Kayak Tour".to_string(),
            status: EventStatus::Booked,
        }
    }

    #[test_case("Confirmed", EventStatus::Booked ; "confirmed is booked")]
    #[test_case("On Hold", EventStatus::Hold ; "on hold")]
    #[test_case("HOLD - pending deposit", EventStatus::Hold ; "uppercase hold")]
    #[test_case("", EventStatus::Booked ; "empty defaults")]
    #[test_case("???", EventStatus::Booked ; "garbage defaults")]
    #[test_case("Booked", EventStatus::Booked ; "booked")]
    fn test_normalize_status(raw: &str, expected: EventStatus) {
        assert_eq!(EventStatus::normalize(raw), expected);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&EventStatus::Hold).unwrap();
        assert_eq!(json, "\"hold\"");
    }

    #[test]
    fn test_title_format() {
        assert_eq!(sample_event().title(), "Ana — Kayak Tour (Smith Family, 4 pax)");
    }

    #[test]
    fn test_end_rolls_past_midnight() {
        let mut event = sample_event();
        event.start_time = "22:00".to_string();
        event.end_time = "02:30".to_string();
        let end = event.end_datetime().unwrap();
        assert_eq!(end.to_string(), "2024-06-02 02:30:00");
    }

    #[test]
    fn test_filter_matches() {
        let event = sample_event();
        let mut filter = EventFilter {
            supplier: Some("ana".to_string()),
            from: NaiveDate::from_ymd_opt(2024, 6, 1),
            to: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        assert!(filter.matches(&event));

        filter.status = Some(EventStatus::Hold);
        assert!(!filter.matches(&event));

        let later = EventFilter { from: NaiveDate::from_ymd_opt(2024, 6, 2), ..Default::default() };
        assert!(!later.matches(&event));
    }
}
