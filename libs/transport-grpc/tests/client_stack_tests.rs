//! Integration tests for gRPC client transport stack

use std::time::Duration;
use tonic::transport::Channel;
use transport_grpc::{GrpcClientConfig, connect_lazy, connect_with_stack};

// Fake client type for testing
#[derive(Clone)]
struct FakeClient {
    _channel: Channel,
}

impl From<Channel> for FakeClient {
    fn from(channel: Channel) -> Self {
        Self { _channel: channel }
    }
}

#[test]
fn default_config_is_sane() {
    let cfg = GrpcClientConfig::default();

    assert!(
        cfg.connect_timeout > Duration::from_millis(0),
        "connect_timeout should be positive"
    );
    assert!(
        cfg.rpc_timeout > Duration::from_millis(0),
        "rpc_timeout should be positive"
    );
    assert!(
        !cfg.service_name.is_empty(),
        "service_name should not be empty"
    );
}

#[test]
fn config_cloning_works() {
    let cfg1 = GrpcClientConfig::new("service1").with_connect_timeout(Duration::from_secs(3));

    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.service_name, cfg2.service_name);
    assert_eq!(cfg1.connect_timeout, cfg2.connect_timeout);
}

#[tokio::test]
async fn connect_lazy_does_not_require_a_running_server() {
    let cfg = GrpcClientConfig::new("test").with_connect_timeout(Duration::from_millis(100));

    // Nothing listens here; lazy construction must still succeed.
    let result = connect_lazy::<FakeClient>("http://127.0.0.1:1", &cfg);
    assert!(result.is_ok(), "lazy connect should not dial the server");
}

#[tokio::test]
async fn connect_lazy_rejects_invalid_uri() {
    let cfg = GrpcClientConfig::default();

    let result = connect_lazy::<FakeClient>("not a uri", &cfg);
    assert!(result.is_err(), "Should fail with invalid URI");
}

#[tokio::test]
async fn connect_with_stack_fails_without_server() {
    let cfg = GrpcClientConfig::new("test")
        .with_connect_timeout(Duration::from_millis(100))
        .with_rpc_timeout(Duration::from_millis(200));

    // Use a non-routable address to test timeout behavior
    let result = connect_with_stack::<FakeClient>("http://192.0.2.1:50051", &cfg).await;

    assert!(
        result.is_err(),
        "Should fail to connect to non-existent server"
    );
}
