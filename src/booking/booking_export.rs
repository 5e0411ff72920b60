//! Calendar (.ics) export for stored bookings.

use super::BookingError;
use super::booking_types::{Event, EventStatus};
use crate::config::ExportConfig;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, Component, DatePerhapsTime, EventLike};
use log::{debug, info, warn};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub calendar_name: String,
    pub timezone: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self { calendar_name: config.calendar_name.clone(), timezone: config.timezone.clone() }
    }
}

/// A rendered iCalendar document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCalendar {
    pub ics: String,
    /// Events written as VEVENTs. Events with unreadable date/time are not counted.
    pub exported: usize,
}

// Zoned bookings are written in UTC: a bare TZID needs a VTIMEZONE block that
// icalendar cannot build, and UTC times are read the same way by every client.
fn calendar_time(date_time: NaiveDateTime, timezone: Option<Tz>) -> Option<DatePerhapsTime> {
    let value = match timezone {
        None => CalendarDateTime::Floating(date_time),
        Some(tz) => {
            let zoned = tz.from_local_datetime(&date_time).earliest().or_else(|| {
                // Local times inside a DST gap are moved past it.
                tz.from_local_datetime(&(date_time + Duration::hours(1))).earliest()
            })?;
            CalendarDateTime::Utc(zoned.with_timezone(&Utc))
        }
    };
    Some(DatePerhapsTime::DateTime(value))
}

fn ics_status(status: EventStatus) -> icalendar::EventStatus {
    match status {
        EventStatus::Booked => icalendar::EventStatus::Confirmed,
        EventStatus::Hold => icalendar::EventStatus::Tentative,
    }
}

fn description(event: &Event) -> String {
    format!(
        "Supplier: {}\nService: {}\nClient: {}\nPax: {}\nStatus: {}",
        event.supplier_name, event.service, event.client_name, event.pax, event.status
    )
}

/// Render events as an iCalendar document, one VEVENT per event.
///
/// Events whose stored date or times no longer parse are skipped with a warning.
pub fn render_calendar(
    events: &[Event],
    options: &ExportOptions,
) -> Result<RenderedCalendar, BookingError> {
    let timezone = match &options.timezone {
        Some(name) => Some(
            name.parse::<Tz>().map_err(|_| BookingError::InvalidTimezone(name.clone()))?,
        ),
        None => None,
    };

    let mut calendar = icalendar::Calendar::new();
    calendar.name(&options.calendar_name);
    if let Some(name) = &options.timezone {
        calendar.timezone(name);
    }

    let mut exported = 0;
    for event in events {
        let times = event
            .start_datetime()
            .zip(event.end_datetime())
            .and_then(|(start, end)| calendar_time(start, timezone).zip(calendar_time(end, timezone)));
        let Some((start, end)) = times else {
            warn!("Skipping event {} with unreadable date/time", event.event_id);
            continue;
        };

        let ics_event = icalendar::Event::new()
            .uid(&event.event_id)
            .summary(&event.title())
            .description(&description(event))
            .starts(start)
            .ends(end)
            .status(ics_status(event.status))
            .done();
        calendar.push(ics_event);
        exported += 1;
    }

    debug!("Rendered {} of {} events into calendar '{}'", exported, events.len(), options.calendar_name);
    Ok(RenderedCalendar { ics: calendar.done().to_string(), exported })
}

/// Write the rendered calendar to `path`. Returns how many events were written.
pub fn export_to_file(events: &[Event], options: &ExportOptions, path: &Path) -> Result<usize> {
    let rendered = render_calendar(events, options)?;
    std::fs::write(path, &rendered.ics)
        .with_context(|| format!("Failed to write calendar file {}", path.display()))?;
    info!("Exported {} events to {}", rendered.exported, path.display());
    Ok(rendered.exported)
}
