//! Service layer.

mod portal_service;

pub use portal_service::{PortalManager, PortalService};

#[cfg(any(test, feature = "test-utils"))]
pub use portal_service::MockPortalService;
