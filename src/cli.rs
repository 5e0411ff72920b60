use crate::booking::{EventDraft, EventFilter, EventStatus};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bookboard - a terminal booking board for supplier services
#[derive(Debug, Parser)]
#[command(name = "bookboard")]
#[command(about = "Import, manage and export supplier bookings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive terminal mode)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to an alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import bookings from a CSV export
    Import {
        /// File to import
        #[arg(required = true)]
        file: PathBuf,

        /// Field delimiter (defaults to the configured one)
        #[arg(long)]
        delimiter: Option<char>,

        /// Show what would be imported without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a single booking
    #[command(alias = "create")]
    Add(EventFields),

    /// Replace an existing booking
    Edit {
        /// Event ID
        #[arg(required = true)]
        event_id: String,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete a booking
    #[command(alias = "remove")]
    Delete {
        /// Event ID
        #[arg(required = true)]
        event_id: String,
    },

    /// List bookings
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Export bookings as an .ics calendar file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Export only these event IDs
        #[arg(long = "id", value_delimiter = ',')]
        ids: Vec<String>,

        /// Output file (defaults to the configured export file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List known suppliers
    Suppliers,

    /// List known services
    Services,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Booked,
    Hold,
}

impl From<StatusArg> for EventStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Booked => EventStatus::Booked,
            StatusArg::Hold => EventStatus::Hold,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct EventFields {
    /// Supplier performing the service
    #[arg(long)]
    pub supplier: String,

    /// Service name
    #[arg(long)]
    pub service: String,

    /// Client name
    #[arg(long)]
    pub client: String,

    /// Service date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: String,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: String,

    /// Number of travellers
    #[arg(long, default_value_t = 0)]
    pub pax: u32,

    /// Booking status
    #[arg(long, value_enum, default_value = "booked")]
    pub status: StatusArg,
}

impl From<EventFields> for EventDraft {
    fn from(fields: EventFields) -> Self {
        EventDraft {
            supplier_name: fields.supplier,
            service: fields.service,
            client_name: fields.client,
            date: fields.date,
            start_time: fields.start,
            end_time: fields.end,
            pax: fields.pax,
            status: fields.status.into(),
        }
    }
}

/// Fields for an edit. Omitted fields keep their stored value.
#[derive(Debug, Clone, Args)]
pub struct EditFields {
    #[arg(long)]
    pub supplier: Option<String>,
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub pax: Option<u32>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

impl EditFields {
    /// Overlay the given fields onto a draft of the stored event.
    pub fn apply(self, mut draft: EventDraft) -> EventDraft {
        if let Some(supplier) = self.supplier {
            draft.supplier_name = supplier;
        }
        if let Some(service) = self.service {
            draft.service = service;
        }
        if let Some(client) = self.client {
            draft.client_name = client;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(pax) = self.pax {
            draft.pax = pax;
        }
        if let Some(status) = self.status {
            draft.status = status.into();
        }
        draft
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Supplier name contains
    #[arg(long)]
    pub supplier: Option<String>,

    /// Service name contains
    #[arg(long)]
    pub service: Option<String>,

    /// Client name contains
    #[arg(long)]
    pub client: Option<String>,

    /// Only this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

impl From<FilterArgs> for EventFilter {
    fn from(args: FilterArgs) -> Self {
        EventFilter {
            from: args.from,
            to: args.to,
            supplier: args.supplier,
            service: args.service,
            client: args.client,
            status: args.status.map(Into::into),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Show configuration
    #[command(aliases = ["list", "get"])]
    Show {
        /// Key to show (all settings when omitted)
        key: Option<String>,
    },

    /// Set configuration value
    Set {
        /// Configuration key
        #[arg(required = true)]
        key: String,

        /// Configuration value (empty clears optional settings)
        #[arg(required = true)]
        value: String,
    },
}
