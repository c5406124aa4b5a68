//! Application state for dependency injection.

use std::sync::Arc;

use portal_service_lib::PortalService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<dyn PortalService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(portal: Arc<dyn PortalService>) -> Self {
        Self { portal }
    }
}
