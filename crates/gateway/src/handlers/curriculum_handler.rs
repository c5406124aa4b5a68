//! Curriculum and course handlers.

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{CourseInfo, CourseQuery, Curriculum, PortalResult};

use super::{empty_as_none, reject_unless_ok, MessageResponse};
use crate::extractors::ValidatedForm;
use crate::state::AppState;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2,4}$").expect("valid year pattern"));
static SEMESTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").expect("valid semester pattern"));

/// Curriculum or course lookup form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CourseForm {
    /// Student ID used to log in
    #[serde(rename = "studentID", default)]
    #[schema(example = "108590000")]
    pub student_id: String,
    /// Portal password
    #[serde(default)]
    pub password: String,
    /// Student to look up; defaults to the logged-in student
    #[serde(rename = "targetStudentID", default, deserialize_with = "empty_as_none")]
    #[schema(example = "108590001")]
    pub target_student_id: Option<String>,
    /// Academic year; defaults to the current term
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(regex(path = *YEAR, message = "year must be 2 to 4 digits"))]
    #[schema(example = "114")]
    pub year: Option<String>,
    /// Semester within the year
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(regex(path = *SEMESTER, message = "semester must be a single digit"))]
    #[schema(example = "1")]
    pub semester: Option<String>,
}

impl CourseForm {
    /// Build the lookup this form describes
    pub fn query(&self) -> CourseQuery {
        CourseQuery {
            student_id: self.student_id.clone(),
            target_student_id: self.target_student_id.clone().unwrap_or_default(),
            year: self.year.clone(),
            semester: self.semester.clone(),
        }
    }
}

/// Create curriculum routes
pub fn curriculum_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(list_curriculums))
        .route("/courses", post(list_courses))
}

fn render(result: PortalResult) -> Response {
    match reject_unless_ok(result) {
        Ok(result) => Json(result.into_data()).into_response(),
        Err(rejection) => rejection,
    }
}

/// List the terms a student has courses in
#[utoipa::path(
    post,
    path = "/curriculums",
    tag = "Portal",
    request_body(content = CourseForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Terms, newest first", body = Vec<Curriculum>),
        (status = 401, description = "Credentials rejected", body = MessageResponse),
        (status = 502, description = "Portal unreachable")
    )
)]
pub async fn list_curriculums(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<CourseForm>,
) -> AppResult<Response> {
    let result = state.portal.curriculums(&form.query(), &form.password).await?;
    Ok(render(result))
}

/// List the courses of one term
#[utoipa::path(
    post,
    path = "/curriculums/courses",
    tag = "Portal",
    request_body(content = CourseForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Courses of the term", body = Vec<CourseInfo>),
        (status = 400, description = "Invalid term or no data for it", body = MessageResponse),
        (status = 401, description = "Credentials rejected", body = MessageResponse),
        (status = 502, description = "Portal unreachable")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<CourseForm>,
) -> AppResult<Response> {
    let result = state.portal.courses(&form.query(), &form.password).await?;
    Ok(render(result))
}
