//! Repository layer: turning portal answers into results.

mod result_repository;

pub use result_repository::{PortalResponse, ResponseInterpreter, ResultRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use result_repository::MockResponseInterpreter;
