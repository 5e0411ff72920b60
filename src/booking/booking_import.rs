//! CSV import logic for the booking board.
//
// Bulk bookings arrive as spreadsheet exports with unpredictable headers,
// date/time formats and status wording. `normalize` maps them onto `Event`
// rows; `import_table` persists a normalized batch and updates the supplier
// and service master lists.

use super::BookingError;
use super::booking_parse::{parse_date, parse_pax, parse_time};
use super::booking_types::{Event, EventStatus, DATE_FORMAT, TIME_FORMAT};
use super::column_match::{ColumnMap, MissingColumnsError};
use crate::state::BoardStore;
use anyhow::{Context, Result};
use chrono::Duration;
use log::{debug, info};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Length of an imported booking. Exports carry no end time, so every row gets 4.5 hours.
pub const DEFAULT_DURATION_MINUTES: i64 = 270;

/// A header row plus data rows, as read from a delimited export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a delimited table. Rows may be shorter or longer than the header.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", index + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::from_reader(file, delimiter)
    }

    fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Output of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub events: Vec<Event>,
    /// 1-based data-row numbers skipped for an unparseable date or time.
    pub dropped_rows: Vec<usize>,
}

/// Map a raw export onto normalized events.
///
/// Rows whose date or time cannot be parsed are skipped rather than reported
/// as errors; only unresolvable required columns fail the batch.
pub fn normalize(table: &RawTable) -> Result<NormalizedBatch, MissingColumnsError> {
    let columns = ColumnMap::resolve(&table.headers)?;
    debug!("Resolved import columns: {:?}", columns);

    let duration = Duration::minutes(DEFAULT_DURATION_MINUTES);
    let mut batch = NormalizedBatch::default();

    for (row_index, row) in table.rows.iter().enumerate() {
        let cell = |index: usize| RawTable::cell(row, index);

        let (Some(date), Some(time)) = (parse_date(cell(columns.date)), parse_time(cell(columns.time)))
        else {
            debug!(
                "Dropping row {}: date '{}' / time '{}' not parseable",
                row_index + 1,
                cell(columns.date),
                cell(columns.time)
            );
            batch.dropped_rows.push(row_index + 1);
            continue;
        };

        let start = date.and_time(time);
        let end = start + duration;
        let status = match columns.status {
            Some(index) => EventStatus::normalize(cell(index)),
            None => EventStatus::Booked,
        };
        // Suffix is the position among surviving rows, not the file row number.
        let sequence = batch.events.len();

        batch.events.push(Event {
            event_id: format!("E{}{:02}", start.format("%Y%m%d%H%M%S"), sequence),
            supplier_name: cell(columns.supplier).trim().to_string(),
            date: start.format(DATE_FORMAT).to_string(),
            start_time: start.format(TIME_FORMAT).to_string(),
            end_time: end.format(TIME_FORMAT).to_string(),
            client_name: cell(columns.client).trim().to_string(),
            pax: parse_pax(cell(columns.pax)),
            service: cell(columns.service).trim().to_string(),
            status,
        });
    }

    Ok(batch)
}

/// Result of a persisted import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub dropped: usize,
    pub event_ids: Vec<String>,
    pub suppliers: Vec<String>,
    pub services: Vec<String>,
}

/// Normalize a table, append the batch to the store and register master names.
///
/// Nothing is written if the columns cannot be resolved or the batch is rejected.
pub fn import_table(store: &BoardStore, table: &RawTable) -> Result<ImportSummary> {
    let batch = normalize(table).map_err(BookingError::from)?;
    let dropped = batch.dropped_rows.len();

    store.append_events(&batch.events)?;

    let suppliers = distinct_names(batch.events.iter().map(|e| &e.supplier_name));
    let services = distinct_names(batch.events.iter().map(|e| &e.service));
    store.register_suppliers(&suppliers)?;
    store.register_services(&services)?;

    info!(
        "Imported {} events ({} rows dropped, {} suppliers, {} services)",
        batch.events.len(),
        dropped,
        suppliers.len(),
        services.len()
    );

    Ok(ImportSummary {
        imported: batch.events.len(),
        dropped,
        event_ids: batch.events.into_iter().map(|e| e.event_id).collect(),
        suppliers: suppliers.into_iter().collect(),
        services: services.into_iter().collect(),
    })
}

// Blank cells are kept on the event but never become master-list entries.
fn distinct_names<'a>(names: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    names.filter(|name| !name.is_empty()).cloned().collect()
}

/// Import events from a delimited file
pub fn import_csv_file(store: &BoardStore, path: &Path, delimiter: u8) -> Result<ImportSummary> {
    info!("Importing bookings from {}", path.display());
    let table = RawTable::from_path(path, delimiter)?;
    import_table(store, &table)
}
