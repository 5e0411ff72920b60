use crate::state::BoardStore;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use std::collections::HashSet;

mod booking_export;
mod booking_import;
mod booking_parse;
mod booking_types;
mod booking_validation;
mod column_match;

pub use booking_export::*;
pub use booking_import::*;
pub use booking_parse::*;
pub use booking_types::*;
pub use booking_validation::*;
pub use column_match::*;

/// Custom error type for booking operations
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    MissingColumns(#[from] MissingColumnsError),
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Event '{0}' not found")]
    EventNotFound(String),
    #[error("Event id '{0}' already exists")]
    DuplicateEventId(String),
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

/// Record a single manually entered booking.
pub fn create_event(store: &BoardStore, draft: EventDraft) -> Result<Event> {
    create_event_at(store, draft, Local::now().naive_local())
}

/// Record a manual booking with an id derived from `now`.
pub fn create_event_at(store: &BoardStore, draft: EventDraft, now: NaiveDateTime) -> Result<Event> {
    let (date, start, end) = validate_draft(&draft)?;

    let existing: HashSet<String> = store.load_events()?.into_iter().map(|e| e.event_id).collect();
    let stamp = now.format("%Y%m%d%H%M%S").to_string();
    let event_id = (0..100)
        .map(|n| format!("E{}{:02}", stamp, n))
        .find(|id| !existing.contains(id))
        .ok_or_else(|| BookingError::DuplicateEventId(format!("E{}99", stamp)))?;

    let event = build_event(event_id, &draft, date, start, end);
    debug!("Creating event: {:?}", event);
    store.append_events(std::slice::from_ref(&event))?;
    register_masters(store, &event)?;
    info!("Created event {}", event.event_id);
    Ok(event)
}

/// Replace every field of an existing booking.
pub fn update_event(store: &BoardStore, event_id: &str, draft: EventDraft) -> Result<Event> {
    let (date, start, end) = validate_draft(&draft)?;
    let event = build_event(event_id.to_string(), &draft, date, start, end);
    store.replace_event(event.clone())?;
    register_masters(store, &event)?;
    info!("Updated event {}", event.event_id);
    Ok(event)
}

pub fn delete_event(store: &BoardStore, event_id: &str) -> Result<Event> {
    let removed = store.remove_event(event_id)?;
    info!("Deleted event {}", event_id);
    Ok(removed)
}

/// Stored events matching `filter`, ordered by date, start time and supplier.
pub fn list_events(store: &BoardStore, filter: &EventFilter) -> Result<Vec<Event>> {
    let mut events: Vec<Event> =
        store.load_events()?.into_iter().filter(|e| filter.matches(e)).collect();
    events.sort_by(|a, b| {
        (&a.date, &a.start_time, &a.supplier_name).cmp(&(&b.date, &b.start_time, &b.supplier_name))
    });
    Ok(events)
}

fn build_event(
    event_id: String,
    draft: &EventDraft,
    date: chrono::NaiveDate,
    start: chrono::NaiveTime,
    end: chrono::NaiveTime,
) -> Event {
    Event {
        event_id,
        supplier_name: draft.supplier_name.trim().to_string(),
        date: date.format(DATE_FORMAT).to_string(),
        start_time: start.format(TIME_FORMAT).to_string(),
        end_time: end.format(TIME_FORMAT).to_string(),
        client_name: draft.client_name.trim().to_string(),
        pax: draft.pax,
        service: draft.service.trim().to_string(),
        status: draft.status,
    }
}

fn register_masters(store: &BoardStore, event: &Event) -> Result<()> {
    store.register_suppliers([&event.supplier_name])?;
    store.register_services([&event.service])?;
    Ok(())
}
