use super::BoardContext;
use super::events::print_events;
use crate::booking::{self, RawTable};
use crate::config::ImportConfig;
use anyhow::Result;
use std::path::Path;

pub fn handle_import(
    ctx: &BoardContext,
    file: &Path,
    delimiter: Option<char>,
    dry_run: bool,
) -> Result<()> {
    let delimiter = match delimiter {
        Some(delimiter) => ImportConfig { delimiter }.delimiter_byte()?,
        None => ctx.config.import.delimiter_byte()?,
    };

    if dry_run {
        let table = RawTable::from_path(file, delimiter)?;
        let batch = booking::normalize(&table)?;
        println!("Dry run: {} events would be imported", batch.events.len());
        if !batch.dropped_rows.is_empty() {
            println!("Rows skipped (unreadable date/time): {:?}", batch.dropped_rows);
        }
        print_events(&batch.events);
        return Ok(());
    }

    let summary = booking::import_csv_file(&ctx.store, file, delimiter)?;
    println!("Imported {} events from {}", summary.imported, file.display());
    if summary.dropped > 0 {
        println!("Skipped {} rows with an unreadable date or time", summary.dropped);
    }
    if !summary.suppliers.is_empty() {
        println!("Suppliers: {}", summary.suppliers.join(", "));
    }
    if !summary.services.is_empty() {
        println!("Services: {}", summary.services.join(", "));
    }
    Ok(())
}
