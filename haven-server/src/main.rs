//! Haven server binary

use anyhow::{Context, Result};
use clap::Parser;
use haven_config::{BackendMode, ConfigLoader, HavenConfig};
use haven_server::Server;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML); HAVEN_* environment variables override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:3000
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Serve the seeded in-memory listings instead of the hosted backend
    #[arg(long)]
    memory: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    haven_logging::init_logging_from_config(&config.logging)?;

    Server::new(config)?.start().await
}

fn apply_cli_overrides(config: &mut HavenConfig, cli: &Cli) {
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind.ip().to_string();
        config.server.port = bind.port();
    }

    if cli.memory {
        config.backend.mode = BackendMode::Memory;
    }
}
