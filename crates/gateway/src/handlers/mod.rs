//! HTTP handlers.

pub mod curriculum_handler;
pub mod health_handler;
pub mod login_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use domain::PortalResult;

pub use curriculum_handler::curriculum_routes;
pub use health_handler::health_routes;
pub use login_handler::login_routes;

/// Body returned when the portal did not answer with 200
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Portal message or failure reason
    #[schema(value_type = Object, example = "incorrect student ID or password")]
    pub message: serde_json::Value,
}

/// Render a non-200 result as its status plus `{"message": data}`.
///
/// Returns the result back when it is a plain 200.
pub(crate) fn reject_unless_ok(result: PortalResult) -> Result<PortalResult, Response> {
    if result.status() == StatusCode::OK.as_u16() {
        return Ok(result);
    }

    let status = StatusCode::from_u16(result.status()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = MessageResponse {
        message: result.into_data(),
    };
    Err((status, Json(body)).into_response())
}

/// Treat blank form values as missing
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
