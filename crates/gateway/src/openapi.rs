//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::curriculum_handler::CourseForm;
use crate::handlers::login_handler::LoginForm;
use crate::handlers::MessageResponse;
use domain::{CourseInfo, CoursePeriod, Curriculum, Weekday};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::login_handler::login,
        crate::handlers::curriculum_handler::list_curriculums,
        crate::handlers::curriculum_handler::list_courses,
    ),
    components(
        schemas(
            LoginForm,
            CourseForm,
            MessageResponse,
            Curriculum,
            CourseInfo,
            CoursePeriod,
            Weekday,
        )
    ),
    tags(
        (name = "Portal", description = "Student portal login and curriculum lookups"),
    )
)]
pub struct ApiDoc;
