//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled            |
//! |-----------|-----------------------------|
//! | `order`   | `Order`                     |
//! | `orders`  | `Orders`, `Forget`          |
//! | `view`    | `View`, `Status`            |
//! | `admin`   | `Admin`                     |
//! | `auth`    | `Auth`                      |
//! | `config`  | `Config`                    |

pub mod admin;
pub mod auth;
pub mod config;
pub mod order;
pub mod orders;
pub mod view;

pub use admin::cmd_admin;
pub use auth::cmd_auth;
pub use config::cmd_config;
pub use order::cmd_order;
pub use orders::{cmd_forget, cmd_orders};
pub use view::{cmd_status, cmd_view};

use anyhow::{Context, Result};
use std::sync::Arc;

use lockopener::api::ApiClient;
use lockopener::config::LockopenerConfig;
use lockopener::i18n::Messages;
use lockopener::registry::OrderRegistry;
use lockopener::storage::{FileStore, SharedStore};

use super::Cli;

/// Everything a command needs, built once from the CLI flags.
pub struct AppContext {
    pub config: LockopenerConfig,
    pub api: ApiClient,
    pub registry: OrderRegistry,
    pub messages: &'static Messages,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = LockopenerConfig::new(cli.config.clone(), cli.data_dir.clone())?;
        config.cli_api_url = cli.api_url.clone();
        config.cli_lang = cli.lang;
        config.yes = cli.yes;

        for warning in config.validate() {
            tracing::warn!("{}", warning);
        }

        let store: SharedStore = Arc::new(FileStore::new(config.storage_file()));
        let api_url = config.api_url();
        let api = ApiClient::with_timeout(&api_url, store.clone(), config.timeout())
            .with_context(|| format!("Cannot use API URL '{}'", api_url))?;
        let messages = config.lang().messages();

        Ok(Self {
            config,
            api,
            registry: OrderRegistry::new(store),
            messages,
        })
    }

    /// Ask before a destructive action unless `--yes` was given.
    pub fn confirm(&self, prompt: &str) -> bool {
        if self.config.yes {
            return true;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Resolve once Ctrl+C is pressed.
pub async fn wait_for_ctrl_c() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")
}

/// Clear the terminal before redrawing a watch screen. No-op when stdout is
/// not a terminal.
pub fn clear_screen() {
    let term = console::Term::stdout();
    if term.is_term() {
        let _ = term.clear_screen();
    }
}
