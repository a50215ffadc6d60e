//! Courier - delivery driver companion CLI
//!
//! Main entry point: initializes tracing, loads configuration, builds the
//! client stack, and dispatches the requested command.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courier::cli::{Cli, Commands};
use courier::commands::{self, AppContext};
use courier::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration from the explicit --config path or the platform
    // config directory; a missing file means defaults.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(default_config_path);
    let mut config = Config::load(&config_path)?;

    // CLI/env base URL override takes precedence over the file.
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    config.validate()?;

    let ctx = AppContext::build(config).await?;

    match cli.command {
        Commands::Login { email } => commands::auth::run_login(&ctx, &email).await,
        Commands::Exchange { token } => commands::auth::run_exchange(&ctx, &token).await,
        Commands::Deliveries { date, status } => {
            commands::deliveries::run_list(&ctx, date, status).await
        }
        Commands::Delivery { id } => commands::deliveries::run_detail(&ctx, &id).await,
        Commands::Ping => commands::ping::run_ping(&ctx).await,
        Commands::Whoami => commands::auth::run_whoami(&ctx).await,
        Commands::Logout => commands::auth::run_logout(&ctx).await,
    }
}

/// Initialize tracing with an env-filter; `--verbose` lowers the default
/// level to debug.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "courier=debug" } else { "courier=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// The platform-conventional config file location, falling back to a
/// relative path when the platform provides no config directory.
fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "courier-hq", "courier")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("config/config.yaml"))
}
