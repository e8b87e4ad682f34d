//! `calculator-launcher`: runs `calculator-server` and `calculator-gateway`
//! side by side, relays their logs and stops both on Ctrl+C / SIGTERM.

mod config;
mod log_forwarder;
mod supervisor;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use config::{ENV_PREFIX, LauncherConfig};
use supervisor::{ChildSpec, Supervisor};

const SERVER_BIN: &str = "calculator-server";
const GATEWAY_BIN: &str = "calculator-gateway";

/// Start the calculator backend and HTTP gateway
#[derive(Parser)]
#[command(name = "calculator-launcher")]
#[command(about = "Start the calculator backend and HTTP gateway together")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the calculator-server executable
    #[arg(long)]
    server_bin: Option<PathBuf>,

    /// Path to the calculator-gateway executable
    #[arg(long)]
    gateway_bin: Option<PathBuf>,

    /// Delay between starting the backend and the gateway, in milliseconds
    #[arg(long)]
    start_delay_ms: Option<u64>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, config: &mut LauncherConfig) {
        if let Some(path) = &self.server_bin {
            config.server_bin = Some(path.clone());
        }
        if let Some(path) = &self.gateway_bin {
            config.gateway_bin = Some(path.clone());
        }
        if let Some(ms) = self.start_delay_ms {
            config.start_delay_ms = ms;
        }
    }
}

/// Use `explicit` if set, otherwise `name` next to `launcher_exe`.
fn resolve_binary(explicit: Option<&Path>, name: &str, launcher_exe: &Path) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => launcher_exe
            .parent()
            .context("launcher executable has no parent directory")?
            .join(format!("{name}{}", std::env::consts::EXE_SUFFIX)),
    };
    if !path.is_file() {
        bail!("{name} executable not found at {}", path.display());
    }
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: LauncherConfig = bootstrap::load_layered(cli.config.as_deref(), ENV_PREFIX)?;
    cli.apply_overrides(&mut config);

    if cli.print_config {
        println!("Effective configuration:\n{}", bootstrap::to_yaml(&config)?);
        return Ok(());
    }

    bootstrap::init_logging(&config.logging, cli.verbose);

    let exe = std::env::current_exe().context("cannot locate launcher executable")?;
    let server = ChildSpec {
        name: SERVER_BIN.to_owned(),
        binary: resolve_binary(config.server_bin.as_deref(), SERVER_BIN, &exe)?,
        args: config.server_args.clone(),
    };
    let gateway = ChildSpec {
        name: GATEWAY_BIN.to_owned(),
        binary: resolve_binary(config.gateway_bin.as_deref(), GATEWAY_BIN, &exe)?,
        args: config.gateway_args.clone(),
    };

    tracing::info!("Starting services...");
    let cancel = bootstrap::shutdown_token();
    let mut supervisor = Supervisor::new(cancel.clone(), config.shutdown_grace());

    supervisor.spawn(&server)?;

    // Give the backend a head start before the gateway begins probing it.
    tokio::select! {
        () = tokio::time::sleep(config.start_delay()) => {
            if let Err(e) = supervisor.spawn(&gateway) {
                tracing::error!(error = %e, "failed to start gateway, shutting down");
                cancel.cancel();
            }
        }
        () = cancel.cancelled() => {
            tracing::info!("shutdown requested before gateway start");
        }
    }

    let exits = supervisor.join().await;
    tracing::info!("Shutting down services...");

    let failed: Vec<_> = exits.iter().filter(|e| e.is_failure()).collect();
    if failed.is_empty() {
        Ok(())
    } else {
        let names: Vec<_> = failed.iter().map(|e| e.name.as_str()).collect();
        bail!("service(s) exited with failure: {}", names.join(", "))
    }
}
