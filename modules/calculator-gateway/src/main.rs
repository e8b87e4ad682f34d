//! `calculator-gateway`: HTTP front end for the calculator backend.
//!
//! Configuration is layered: defaults, then `--config` YAML, then
//! `CALC_GATEWAY__*` environment variables, then CLI flags.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use calculator_gateway::{AppState, ENV_PREFIX, GatewayConfig, Service, build_router, server};

/// Calculator HTTP gateway
#[derive(Parser)]
#[command(name = "calculator-gateway")]
#[command(about = "HTTP gateway that forwards additions to the calculator gRPC backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Calculator backend URI override, e.g. http://127.0.0.1:50051
    #[arg(short, long)]
    backend: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: GatewayConfig = bootstrap::load_layered(cli.config.as_deref(), ENV_PREFIX)?;
    config
        .apply_cli_overrides(cli.port, cli.backend)
        .with_context(|| format!("cannot apply --port to '{}'", config.listen_addr))?;

    if cli.print_config {
        println!("Effective configuration:\n{}", bootstrap::to_yaml(&config)?);
        return Ok(());
    }

    config.validate()?;

    bootstrap::init_logging(&config.logging, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Check => check(&config),
    }
}

fn check(config: &GatewayConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let _: std::net::SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.listen_addr))?;
    calculator_sdk::connect_client(&config.backend_uri, &config.grpc_client_config())?;
    println!("Configuration is valid");
    println!("{}", bootstrap::to_yaml(config)?);
    Ok(())
}

async fn run(config: GatewayConfig) -> Result<()> {
    tracing::info!(
        backend = %config.backend_uri,
        probe = ?config.liveness_probe,
        "calculator-gateway starting"
    );

    let client = calculator_sdk::connect_client(&config.backend_uri, &config.grpc_client_config())?;
    let service = Arc::new(Service::new(client, config.liveness_probe));
    let router = build_router(AppState::new(service), config.http_limits());

    let listener = server::bind(&config.listen_addr).await?;
    server::log_endpoints(listener.local_addr()?);

    let cancel = bootstrap::shutdown_token();
    server::serve(listener, router, cancel).await
}
