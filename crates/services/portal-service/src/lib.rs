//! Portal Service Library
//!
//! Logs students into the university portal and scrapes their curriculum
//! and course tables out of the course system. Used by the gateway and by
//! the `portal-service` command line tool.

pub mod client;
pub mod config;
pub mod crawler;
pub mod repository;
pub mod service;
pub mod usecase;

use std::sync::Arc;

use common::AppResult;

use crate::client::PortalClient;
use crate::config::PortalConfig;
use crate::repository::ResultRepository;
use crate::service::PortalManager;
use crate::usecase::ResultResolver;

pub use service::PortalService;

/// Wire the portal stack for the given configuration.
pub fn build_portal_service(config: PortalConfig) -> AppResult<PortalManager> {
    let config = Arc::new(config);

    let client = PortalClient::new(config.clone())?;
    let interpreter = Arc::new(ResultRepository::new());
    let usecase = Arc::new(ResultResolver::new(interpreter, config));

    Ok(PortalManager::new(client, usecase))
}
