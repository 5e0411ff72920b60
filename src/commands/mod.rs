use crate::cli::Commands;
use crate::config::Config;
use crate::state::BoardStore;
use anyhow::Result;
use log::debug;
use std::path::PathBuf;

pub mod config;
pub mod events;
pub mod export;
pub mod help;
pub mod import;
pub mod masters;

/// Everything a command needs: the loaded config and an open store.
#[derive(Debug)]
pub struct BoardContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub store: BoardStore,
}

impl BoardContext {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path.as_deref())?;
        let store = BoardStore::from_config(&config)?;
        debug!("Using state directory {}", store.state_dir().display());
        Ok(Self { config, config_path, store })
    }

    pub fn new(config: Config, config_path: Option<PathBuf>, store: BoardStore) -> Self {
        Self { config, config_path, store }
    }
}

/// Run one parsed command against the board.
pub fn execute(ctx: &mut BoardContext, command: Commands) -> Result<()> {
    debug!("Executing command: {:?}", command);
    match command {
        Commands::Import { file, delimiter, dry_run } => {
            import::handle_import(ctx, &file, delimiter, dry_run)
        }
        Commands::Add(fields) => events::add_event(ctx, fields.into()),
        Commands::Edit { event_id, fields } => events::edit_event(ctx, &event_id, fields),
        Commands::Delete { event_id } => events::delete_event(ctx, &event_id),
        Commands::List(filter) => events::list_events(ctx, filter.into()),
        Commands::Export { filter, ids, output } => {
            export::handle_export(ctx, filter.into(), &ids, output)
        }
        Commands::Suppliers => masters::list_suppliers(ctx),
        Commands::Services => masters::list_services(ctx),
        Commands::Config { action } => config::handle_config(ctx, action),
    }
}

// Public function to print help
pub fn print_help() -> Result<()> {
    help::print_help()
}
