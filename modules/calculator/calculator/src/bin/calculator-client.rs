//! `calculator-client`: one-shot command-line client for the calculator service.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use calculator_sdk::{CalculatorClientV1, CalculatorGrpcClient};
use transport_grpc::GrpcClientConfig;

/// Call the calculator backend from the command line
#[derive(Parser)]
#[command(name = "calculator-client")]
#[command(about = "Add two integers using the calculator gRPC service")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Backend URI
    #[arg(short, long, default_value = "http://127.0.0.1:50051")]
    server: String,

    /// Deadline for each call, in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// First operand
    #[arg(requires = "b")]
    a: Option<i64>,

    /// Second operand
    b: Option<i64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = GrpcClientConfig::new("calculator-client")
        .with_rpc_timeout(Duration::from_millis(cli.timeout_ms))
        .without_tracing();

    let client = match CalculatorGrpcClient::connect(cli.server.clone(), &cfg).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: failed to connect to {}: {e:#}", cli.server);
            return ExitCode::FAILURE;
        }
    };

    let pairs = match (cli.a, cli.b) {
        (Some(a), Some(b)) => vec![(a, b)],
        _ => {
            println!("Usage: calculator-client [--server URI] <a> <b>");
            println!("Running demo calculations...");
            vec![(5, 3), (10, 20)]
        }
    };

    for (a, b) in pairs {
        match client.add(a, b).await {
            Ok(sum) => println!("Sum of {a} and {b} is: {sum}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
