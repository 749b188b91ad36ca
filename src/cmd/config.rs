//! Configuration view and validation commands: `lockopener config`.

use anyhow::Result;

use lockopener::config::{LockopenerConfig, LockopenerToml};

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    let mut config = LockopenerConfig::new(cli.config.clone(), cli.data_dir.clone())?;
    config.cli_api_url = cli.api_url.clone();
    config.cli_lang = cli.lang;
    let config_path = config.config_path.clone();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Lockopener Configuration");
            println!("========================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No config.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[api]");
            println!("  url = \"{}\"", toml.api.url);
            println!("  timeout_secs = {}", toml.api.timeout_secs);
            println!();
            println!("[polling]");
            println!("  interval_secs = {}", toml.polling.interval_secs);
            println!("  admin_refresh_secs = {}", toml.polling.admin_refresh_secs);
            println!(
                "  prune_on_bad_request = {}",
                toml.polling.prune_on_bad_request
            );
            println!();
            println!("[ui]");
            println!("  lang = \"{}\"", toml.ui.lang);
            println!("  default_city = \"{}\"", toml.ui.default_city);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  api_url = \"{}\"", config.api_url());
            println!("  lang = \"{}\"", config.lang());
            println!("  data_dir = \"{}\"", config.data_dir.display());
            println!("  storage_file = \"{}\"", config.storage_file().display());
            println!();

            if !config_path.exists() {
                println!("Run 'lockopener config init' to create a config.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No config.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("config.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            LockopenerToml::default().save(&config_path)?;

            println!("Created config.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] url, timeout_secs");
            println!("  - [polling] interval_secs, admin_refresh_secs, prune_on_bad_request");
            println!("  - [ui] lang, default_city");
            println!();
        }
    }

    Ok(())
}
