//! # dnsblast
//!
//! Fires concurrent TXT queries (AD bit set, EDNS0 payload 65535) at one
//! DNS endpoint and reports every outcome.

use clap::Parser;
use dnsblast_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "dnsblast")]
#[command(version)]
#[command(about = "Concurrent DNS TXT query generator")]
struct Cli {
    /// Domain names to query, one concurrent job each (overrides config)
    #[arg(value_name = "NAMES")]
    names: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Target host (IP address or hostname)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Target UDP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Per-query timeout in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Sequential queries per name
    #[arg(short = 'r', long)]
    repeat: Option<u32>,

    /// Maximum number of jobs running at once
    #[arg(short = 'j', long)]
    max_concurrency: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print only the summary line
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        host: cli.host.clone(),
        port: cli.port,
        timeout_ms: cli.timeout_ms,
        names: Some(cli.names.clone()),
        repeat: cli.repeat,
        max_concurrency: cli.max_concurrency,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    info!("Starting dnsblast v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after in-flight queries");
            ctrl_c_token.cancel();
        }
    });

    let dispatch = di::build_dispatch(&config, shutdown);
    let report = dispatch
        .execute(&config.load.names, config.load.repeat)
        .await?;

    output::print_report(&report, cli.quiet)?;

    Ok(())
}
