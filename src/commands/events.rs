use super::BoardContext;
use crate::booking::{self, BookingError, Event, EventDraft, EventFilter};
use crate::cli::EditFields;
use anyhow::Result;

pub fn add_event(ctx: &BoardContext, draft: EventDraft) -> Result<()> {
    let event = booking::create_event(&ctx.store, draft)?;
    println!("Booking saved: {} {}", event.event_id, event.title());
    Ok(())
}

pub fn edit_event(ctx: &BoardContext, event_id: &str, fields: EditFields) -> Result<()> {
    let stored = ctx
        .store
        .find_event(event_id)?
        .ok_or_else(|| BookingError::EventNotFound(event_id.to_string()))?;
    let draft = fields.apply(EventDraft::from_event(&stored));
    let event = booking::update_event(&ctx.store, event_id, draft)?;
    println!("Booking updated: {} {}", event.event_id, event.title());
    Ok(())
}

pub fn delete_event(ctx: &BoardContext, event_id: &str) -> Result<()> {
    let removed = booking::delete_event(&ctx.store, event_id)?;
    println!("Booking deleted: {} {}", removed.event_id, removed.title());
    Ok(())
}

pub fn list_events(ctx: &BoardContext, filter: EventFilter) -> Result<()> {
    let events = booking::list_events(&ctx.store, &filter)?;
    if events.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }
    println!("Bookings ({}):", events.len());
    print_events(&events);
    Ok(())
}

pub(crate) fn print_events(events: &[Event]) {
    for event in events {
        println!("  - {}", event.title());
        println!("    ID: {}", event.event_id);
        println!("    When: {} {}-{}", event.date, event.start_time, event.end_time);
        println!("    Status: {}", event.status);
        println!();
    }
}
