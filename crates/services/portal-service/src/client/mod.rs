//! HTTP access to the student portal.

mod session;
mod sign_on;

pub use session::{build_login_request, PortalClient, PortalSession};
pub use sign_on::SignOnForm;
