#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Smoke tests for the `calculator-client` binary.

use std::sync::Arc;

use calculator::domain::Service;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

const CLIENT_BIN: &str = env!("CARGO_BIN_EXE_calculator-client");

async fn start_backend() -> (String, CancellationToken) {
    let listener = calculator::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    tokio::spawn(calculator::serve(
        listener,
        Arc::new(Service::new()),
        cancel.clone(),
    ));
    (format!("http://{addr}"), cancel)
}

#[tokio::test]
async fn prints_sum_of_operands() {
    let (uri, cancel) = start_backend().await;

    let output = Command::new(CLIENT_BIN)
        .args(["--server", &uri, "7", "-2"])
        .output()
        .await
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sum of 7 and -2 is: 5"), "stdout: {stdout}");

    cancel.cancel();
}

#[tokio::test]
async fn runs_demo_without_operands() {
    let (uri, cancel) = start_backend().await;

    let output = Command::new(CLIENT_BIN)
        .args(["--server", &uri])
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: calculator-client"));
    assert!(stdout.contains("Sum of 5 and 3 is: 8"));
    assert!(stdout.contains("Sum of 10 and 20 is: 30"));

    cancel.cancel();
}

#[tokio::test]
async fn rejects_non_integer_operand() {
    let output = Command::new(CLIENT_BIN)
        .args(["--server", "http://127.0.0.1:1", "five", "3"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn reports_unreachable_backend() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let output = Command::new(CLIENT_BIN)
        .args(["--server", &format!("http://{addr}"), "1", "1"])
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr: {stderr}");
}
