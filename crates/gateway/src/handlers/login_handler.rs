//! Login handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;

use super::{reject_unless_ok, MessageResponse};
use crate::extractors::ValidatedForm;
use crate::state::AppState;

/// Login form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    /// Portal student ID
    #[serde(rename = "studentID", default)]
    #[schema(example = "108590000")]
    pub student_id: String,
    /// Portal password
    #[serde(default)]
    #[schema(example = "secret")]
    pub password: String,
}

/// Create login routes
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/", post(login))
}

/// Log into the student portal
#[utoipa::path(
    post,
    path = "/login",
    tag = "Portal",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Credentials accepted"),
        (status = 401, description = "Credentials rejected", body = MessageResponse),
        (status = 502, description = "Portal unreachable")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<Response> {
    let result = state.portal.login(&form.student_id, &form.password).await?;

    Ok(match reject_unless_ok(result) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(rejection) => rejection,
    })
}
