use anyhow::Result;
use clap::{Parser, Subcommand};
use lockopener::common::OrderStatus;
use lockopener::i18n::Lang;
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "lockopener")]
#[command(version, about = "Order a locksmith and track your orders")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,

    /// Message language (pl or en). Overrides config.toml.
    #[arg(long, global = true)]
    pub lang: Option<Lang>,

    /// Backend base URL, e.g. http://localhost:3001/api. Overrides env and config.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for local storage (tracked orders, cached credentials)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true, env = "LOCKOPENER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Place a new order
    Order {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Street and house number
        #[arg(long)]
        street: String,
        /// Defaults to ui.default_city from config.toml
        #[arg(long)]
        city: Option<String>,
        /// Consent to the processing of personal data (GDPR)
        #[arg(long)]
        gdpr: bool,
    },
    /// List tracked orders, dropping finished ones
    Orders {
        /// Keep refreshing until Ctrl+C
        #[arg(short, long)]
        watch: bool,
    },
    /// Stop tracking an order locally
    Forget { id: String },
    /// Show one order
    View {
        id: String,
        /// Access token (the `t` parameter of the tracking link). Looked up
        /// among tracked orders when omitted.
        #[arg(short = 't', long)]
        token: Option<String>,
        /// Keep the elapsed time ticking until Ctrl+C
        #[arg(short, long)]
        watch: bool,
    },
    /// Show only the status of an order; needs no access token
    Status { id: String },
    /// Staff panel
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Bearer-token login
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// View or create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum AdminCommands {
    /// Verify and cache admin credentials
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long, env = "LOCKOPENER_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget cached admin credentials
    Logout,
    /// Show active and completed orders
    Orders {
        #[arg(short, long)]
        watch: bool,
        /// Open the map for this order in a browser
        #[arg(long, value_name = "ID")]
        open_map: Option<String>,
    },
    /// Create an order on a customer's behalf
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: Option<String>,
    },
    /// List orders through the admin API, with filters
    List {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Correct an order's contact details or address
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Mark an order as done
    Done { id: String },
    /// Delete an order
    Delete { id: String },
    /// Delete an order through the admin API
    Purge { id: String },
    /// Show one order
    Get { id: String },
    /// Assign a technician
    Assign {
        id: String,
        #[arg(long)]
        tech: String,
        #[arg(long)]
        eta: Option<String>,
    },
    /// Set the order status
    Status {
        id: String,
        status: OrderStatus,
        /// Final price in PLN
        #[arg(long)]
        price: Option<f64>,
    },
}

#[derive(Subcommand, Clone)]
pub enum AuthCommands {
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long, env = "LOCKOPENER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show the logged-in user
    Me,
    Logout,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Write a default config.toml
    Init,
    /// Print the config file path
    Path,
    /// Check config.toml for problems
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    lockopener::logging::init_tracing(cli.verbose, cli.log_json);

    let ctx = || cmd::AppContext::from_cli(&cli);

    match &cli.command {
        Commands::Order {
            name,
            phone,
            street,
            city,
            gdpr,
        } => {
            let ctx = ctx()?;
            let form = lockopener::forms::OrderForm {
                name: name.clone(),
                phone: phone.clone(),
                street: street.clone(),
                city: city
                    .clone()
                    .unwrap_or_else(|| ctx.config.default_city().to_string()),
                gdpr: *gdpr,
            };
            cmd::cmd_order(&ctx, form).await?;
        }
        Commands::Orders { watch } => cmd::cmd_orders(&ctx()?, *watch).await?,
        Commands::Forget { id } => cmd::cmd_forget(&ctx()?, id)?,
        Commands::View { id, token, watch } => {
            cmd::cmd_view(&ctx()?, id, token.as_deref(), *watch).await?;
        }
        Commands::Status { id } => cmd::cmd_status(&ctx()?, id).await?,
        Commands::Admin { command } => cmd::cmd_admin(&ctx()?, command.clone()).await?,
        Commands::Auth { command } => cmd::cmd_auth(&ctx()?, command.clone()).await?,
        Commands::Config { command } => cmd::cmd_config(&cli, command.clone())?,
    }

    Ok(())
}
