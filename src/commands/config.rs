use super::BoardContext;
use crate::cli::ConfigActions;
use crate::config::{Config, get_config_path};
use anyhow::Result;

pub fn handle_config(ctx: &mut BoardContext, action: ConfigActions) -> Result<()> {
    match action {
        ConfigActions::Show { key: Some(key) } => {
            println!("{} = {}", key, ctx.config.get(&key)?);
        }
        ConfigActions::Show { key: None } => {
            println!("\nCurrent Configuration:");
            for key in Config::KEYS {
                let value = ctx.config.get(key)?;
                println!("  {} = {}", key, if value.is_empty() { "(not set)" } else { value.as_str() });
            }
        }
        ConfigActions::Set { key, value } => {
            ctx.config.set(&key, &value)?;
            let path = match &ctx.config_path {
                Some(path) => path.clone(),
                None => get_config_path()?,
            };
            ctx.config.save_to(&path)?;
            println!("Configuration updated: {} = {}", key, ctx.config.get(&key)?);
            if key == "storage.data_dir" {
                println!("The new data directory is used from the next start.");
            }
        }
    }
    Ok(())
}
