//! API Gateway Library
//!
//! This crate provides the HTTP REST API in front of the student portal.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use portal_service_lib::build_portal_service;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway on the given address, reading the rest from the environment.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env().with_addr(host, port);
    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create portal service
    let portal = Arc::new(build_portal_service(config.portal.clone())?);
    info!(
        login_url = %config.portal.login_url,
        course_url = %config.portal.course_url,
        "Portal configured"
    );

    // Create app state
    let addr: SocketAddr = config.server.addr().parse()?;
    let state = AppState::new(portal);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
