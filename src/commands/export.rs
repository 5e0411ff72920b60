use super::BoardContext;
use crate::booking::{self, EventFilter, ExportOptions};
use anyhow::Result;
use log::warn;
use std::path::PathBuf;

pub fn handle_export(
    ctx: &BoardContext,
    filter: EventFilter,
    ids: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let mut events = booking::list_events(&ctx.store, &filter)?;
    if !ids.is_empty() {
        events.retain(|e| ids.contains(&e.event_id));
        for id in ids {
            if !events.iter().any(|e| &e.event_id == id) {
                warn!("Event '{}' not found or excluded by filters", id);
            }
        }
    }

    if events.is_empty() {
        println!("Load or add events to export the .ics.");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| ctx.config.export.default_file.clone());
    let options = ExportOptions::from(&ctx.config.export);
    let exported = booking::export_to_file(&events, &options, &path)?;
    println!("Exported {} bookings to {}", exported, path.display());
    if exported < events.len() {
        println!("Skipped {} bookings with unreadable date/time.", events.len() - exported);
    }
    Ok(())
}
