//! `calculator-server`: serves the calculator gRPC service.
//!
//! Configuration is layered: defaults, then `--config` YAML, then
//! `CALC_SERVER__*` environment variables, then CLI flags.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use calculator::domain::Service;
use calculator::{CalculatorConfig, ENV_PREFIX};

/// Calculator gRPC backend
#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Calculator gRPC backend that adds two integers")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address override, e.g. 127.0.0.1:50051
    #[arg(short, long)]
    listen: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: CalculatorConfig = bootstrap::load_layered(cli.config.as_deref(), ENV_PREFIX)?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    if cli.print_config {
        println!("Effective configuration:\n{}", bootstrap::to_yaml(&config)?);
        return Ok(());
    }

    bootstrap::init_logging(&config.logging, cli.verbose);
    tracing::info!(listen_addr = %config.listen_addr, "calculator-server starting");

    let listener = calculator::bind(&config.listen_addr).await?;
    let cancel = bootstrap::shutdown_token();
    calculator::serve(listener, Arc::new(Service::new()), cancel).await
}
