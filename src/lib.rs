pub mod app;
pub mod booking;
pub mod cli;
pub mod commands;
pub mod config;
pub mod state;

use anyhow::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

/// Run a single command, or the interactive terminal when none is given.
pub fn run(config_path: Option<PathBuf>, command: Option<cli::Commands>) -> Result<()> {
    let context = commands::BoardContext::load(config_path)?;
    let mut app = app::Application::new(context);
    match command {
        Some(command) => app.run_command(command),
        None => {
            info!("Initializing Bookboard terminal");
            app.run_terminal()
        }
    }
}

pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use booking::{BookingError, Event, EventStatus, MissingColumnsError};
pub use config::Config;
pub use state::BoardStore;
