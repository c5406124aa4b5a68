//! Integration tests for API endpoints.
//!
//! These tests drive the router with mock portal services, so no portal
//! connection is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{CourseQuery, PortalResult, NO_DATA_MESSAGE};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use portal_service_lib::service::MockPortalService;
use portal_service_lib::PortalService;

// =============================================================================
// Test Helpers
// =============================================================================

/// Portal that cannot be reached at all
struct OfflinePortal;

#[async_trait]
impl PortalService for OfflinePortal {
    async fn login(&self, _student_id: &str, _password: &str) -> AppResult<PortalResult> {
        Err(AppError::transport("connection refused"))
    }

    async fn curriculums(&self, _query: &CourseQuery, _password: &str) -> AppResult<PortalResult> {
        Err(AppError::transport("connection refused"))
    }

    async fn courses(&self, _query: &CourseQuery, _password: &str) -> AppResult<PortalResult> {
        Err(AppError::fetch("GET Select.jsp returned HTTP 500"))
    }

    async fn portal_status(&self) -> AppResult<()> {
        Err(AppError::service_unavailable("portal"))
    }
}

fn app(portal: impl PortalService + 'static) -> Router {
    create_router(AppState::new(Arc::new(portal)))
}

async fn send(router: Router, request: Request<Body>) -> axum::response::Response {
    tokio_test::assert_ok!(router.oneshot(request).await)
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success_returns_empty_ok() {
    let mut portal = MockPortalService::new();
    portal
        .expect_login()
        .withf(|student_id, password| student_id == "A123" && password == "secret")
        .times(1)
        .returning(|_, _| Ok(PortalResult::ok("Alice")));

    let response = app(portal)
        .oneshot(form_request("/login", "studentID=A123&password=secret"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_login_rejected_returns_portal_status_and_message() {
    let mut portal = MockPortalService::new();
    portal
        .expect_login()
        .returning(|_, _| Ok(PortalResult::failure(401, "incorrect student ID or password")));

    let response = app(portal)
        .oneshot(form_request("/login", "studentID=A123&password=wrong"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"message": "incorrect student ID or password"})
    );
}

#[tokio::test]
async fn test_login_forwards_missing_credentials() {
    let mut portal = MockPortalService::new();
    portal
        .expect_login()
        .withf(|student_id, password| student_id.is_empty() && password.is_empty())
        .returning(|_, _| Ok(PortalResult::failure(401, "incorrect student ID or password")));

    let response = app(portal)
        .oneshot(form_request("/login", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unreachable_portal_is_bad_gateway() {
    let response = app(OfflinePortal)
        .oneshot(form_request("/login", "studentID=A123&password=secret"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PORTAL_UNREACHABLE");
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_login_rejects_non_form_body() {
    // No expectations: the portal must not be called
    let portal = MockPortalService::new();

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"studentID":"A123","password":"secret"}"#))
        .unwrap();
    let response = send(app(portal), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Curriculums
// =============================================================================

#[tokio::test]
async fn test_curriculums_default_to_own_history() {
    let mut portal = MockPortalService::new();
    portal
        .expect_curriculums()
        .withf(|query, password| {
            query.target() == "A123" && query.target_student_id.is_empty() && password == "secret"
        })
        .times(1)
        .returning(|_, _| Ok(PortalResult::ok(json!([{"year": "110", "semester": "1"}]))));

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums",
            "studentID=A123&password=secret&targetStudentID=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{"year": "110", "semester": "1"}])
    );
}

#[tokio::test]
async fn test_curriculums_of_another_student() {
    let mut portal = MockPortalService::new();
    portal
        .expect_curriculums()
        .withf(|query, _| query.target() == "B456")
        .returning(|_, _| Ok(PortalResult::ok(json!([]))));

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums",
            "studentID=A123&password=secret&targetStudentID=B456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// =============================================================================
// Courses
// =============================================================================

#[tokio::test]
async fn test_courses_pass_term_through() {
    let mut portal = MockPortalService::new();
    portal
        .expect_courses()
        .withf(|query, _| query.year() == "114" && query.semester() == "1")
        .times(1)
        .returning(|_, _| Ok(PortalResult::ok(json!([{"id": "291704"}]))));

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums/courses",
            "studentID=A123&password=secret&year=114&semester=1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await[0]["id"], "291704");
}

#[tokio::test]
async fn test_courses_blank_term_means_current() {
    let mut portal = MockPortalService::new();
    portal
        .expect_courses()
        .withf(|query, _| query.year.is_none() && query.semester.is_none())
        .returning(|_, _| Ok(PortalResult::ok(json!([]))));

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums/courses",
            "studentID=A123&password=secret&year=&semester=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_courses_without_data_is_bad_request() {
    let mut portal = MockPortalService::new();
    portal
        .expect_courses()
        .returning(|_, _| Ok(PortalResult::no_data()));

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums/courses",
            "studentID=A123&password=secret&year=114&semester=1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"message": NO_DATA_MESSAGE}));
}

#[tokio::test]
async fn test_courses_reject_malformed_year() {
    // No expectations: the portal must not be called
    let portal = MockPortalService::new();

    let response = app(portal)
        .oneshot(form_request(
            "/curriculums/courses",
            "studentID=A123&password=secret&year=abc&semester=1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "year must be 2 to 4 digits");
}

#[tokio::test]
async fn test_course_page_failure_is_bad_gateway() {
    let response = app(OfflinePortal)
        .oneshot(form_request(
            "/curriculums/courses",
            "studentID=A123&password=secret",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"]["code"], "PORTAL_FETCH_FAILED");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_reachable_portal() {
    let mut portal = MockPortalService::new();
    portal.expect_portal_status().returning(|| Ok(()));

    let response = app(portal)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["portal"]["status"], "healthy");
    assert!(body["checked_at"].is_string());
}

#[tokio::test]
async fn test_health_degraded_when_portal_down() {
    let response = app(OfflinePortal)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["portal"]["status"], "unhealthy");
    assert_eq!(body["services"]["portal"]["error"], "Service portal is unavailable");
}

#[tokio::test]
async fn test_health_hides_upstream_error_details() {
    struct BrokenPortal;

    #[async_trait]
    impl PortalService for BrokenPortal {
        async fn login(&self, _: &str, _: &str) -> AppResult<PortalResult> {
            unreachable!()
        }

        async fn curriculums(&self, _: &CourseQuery, _: &str) -> AppResult<PortalResult> {
            unreachable!()
        }

        async fn courses(&self, _: &CourseQuery, _: &str) -> AppResult<PortalResult> {
            unreachable!()
        }

        async fn portal_status(&self) -> AppResult<()> {
            Err(AppError::transport(
                "error sending request (https://nportal.example/index.do)",
            ))
        }
    }

    let response = send(
        app(BrokenPortal),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    let error = body["services"]["portal"]["error"].as_str().unwrap();
    assert_eq!(error, "The student portal could not be reached");
    assert!(!error.contains("nportal.example"));
}
