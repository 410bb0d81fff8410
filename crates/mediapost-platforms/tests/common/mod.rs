//! Shared helpers for the adapter integration tests.

#![allow(dead_code)]

use mediapost_platforms::{Adapter, HttpClient};
use mediapost_types::{EndpointConfig, GatewayConfig, Platform, PublishRequest};
use wiremock::MockServer;

/// Gateway configuration with every platform pointed at `server`.
pub fn mock_config(server: &MockServer) -> GatewayConfig {
    GatewayConfig {
        endpoints: EndpointConfig::uniform(server.uri()),
        ..Default::default()
    }
}

/// The adapter for `platform`, talking to `server`.
pub fn adapter(platform: Platform, server: &MockServer) -> Adapter {
    let config = mock_config(server);
    let http = HttpClient::new(&config).unwrap();
    Adapter::new(platform, &config, &http)
}

/// A request carrying every credential `platform` requires.
pub fn full_request(platform: Platform) -> PublishRequest {
    let mut request = PublishRequest::new(platform, "# Heading\n\nFirst paragraph.\n\nSecond paragraph.")
        .title("Launch notes");
    for field in platform.required_credentials() {
        request = request.credential(*field, format!("{field}-value"));
    }
    request
}
