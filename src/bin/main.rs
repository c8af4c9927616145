//! Account Admin - Terminal User Interface
//!
//! Main entry point for the account admin console. Connects to the account
//! REST backend and runs the terminal interface.

use std::path::PathBuf;

use account_admin::{client::AccountClient, config::AdminConfig, error::Error, tui::run_tui};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "account-admin-tui")]
#[command(about = "Terminal admin console for account records")]
#[command(version)]
struct Args {
    /// Base URL of the account backend
    #[arg(short, long)]
    base_url: Option<String>,

    /// Endpoint path variant (dev -> /Dev/account, development -> /Development/account)
    #[arg(long)]
    api_root: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Default configuration file, used when --config is not given and the
/// file exists
fn default_config_path() -> Option<PathBuf> {
    let path = dirs::home_dir()?
        .join(".account-admin")
        .join("config.toml");
    path.exists().then_some(path)
}

fn build_config(args: &Args) -> Result<AdminConfig, Error> {
    let config_file = args.config.clone().or_else(default_config_path);
    let mut config = AdminConfig::load(config_file.as_deref())?;

    // CLI flags override file and environment
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(api_root) = &args.api_root {
        config.api_root = api_root.parse()?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.debug {
        "account_admin=debug"
    } else {
        "account_admin=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&args)?;
    let client = AccountClient::new(config);

    if let Err(e) = run_tui(client).await {
        eprintln!("TUI Application Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
