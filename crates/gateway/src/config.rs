//! Gateway configuration.

use std::env;

use common::ServiceConfig;
use portal_service_lib::config::PortalConfig;

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP server settings
    pub server: ServiceConfig,
    /// Student portal endpoints
    pub portal: PortalConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();

        Self {
            server: ServiceConfig {
                host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
            },
            portal: PortalConfig::from_env(),
        }
    }

    /// Override the bind address (from the command line).
    pub fn with_addr(mut self, host: impl Into<String>, port: u16) -> Self {
        self.server.host = host.into();
        self.server.port = port;
        self
    }
}
