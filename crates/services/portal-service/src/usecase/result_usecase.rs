//! Result usecase - Orchestrates portal calls into `PortalResult`s.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use common::AppResult;
use domain::{CourseQuery, PortalResult};

use crate::client::build_login_request;
use crate::config::PortalConfig;
use crate::crawler::{CourseParser, DocumentFetcher, EntryParser, RowFetcher};
use crate::repository::{PortalResponse, ResponseInterpreter};

/// Result usecase trait for dependency injection.
///
/// Portal failures to answer at all come back as `Err`; every answer the
/// portal does give, including rejections, is a `PortalResult`.
#[async_trait]
pub trait ResultUsecase: Send + Sync {
    /// Log a student into the portal over the given session.
    ///
    /// Sends exactly one login POST. Credentials are forwarded as given.
    async fn login_result(
        &self,
        http: &Client,
        student_id: &str,
        password: &str,
    ) -> AppResult<PortalResult>;

    /// List the terms the target student has courses in
    async fn curriculum_result_by(
        &self,
        fetcher: &dyn DocumentFetcher,
        parser: &dyn EntryParser,
        query: &CourseQuery,
    ) -> AppResult<PortalResult>;

    /// List the courses of the target student for the queried term
    async fn info_result_by(
        &self,
        fetcher: &dyn RowFetcher,
        parser: &dyn CourseParser,
        query: &CourseQuery,
    ) -> AppResult<PortalResult>;

    /// Result for a term selector that matched nothing
    fn no_data_result(&self) -> PortalResult;
}

/// Concrete implementation of ResultUsecase.
pub struct ResultResolver {
    interpreter: Arc<dyn ResponseInterpreter>,
    config: Arc<PortalConfig>,
}

impl ResultResolver {
    /// Create new usecase instance with an interpreter and portal settings
    pub fn new(interpreter: Arc<dyn ResponseInterpreter>, config: Arc<PortalConfig>) -> Self {
        Self {
            interpreter,
            config,
        }
    }
}

#[async_trait]
impl ResultUsecase for ResultResolver {
    async fn login_result(
        &self,
        http: &Client,
        student_id: &str,
        password: &str,
    ) -> AppResult<PortalResult> {
        let request = build_login_request(http, &self.config, student_id, password)
            .map_err(|e| {
                error!(student = student_id, error = %e, "Failed to build login request");
                e
            })?;

        let response = http.execute(request).await.map_err(|e| {
            error!(student = student_id, error = %e, "Login request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(student = student_id, error = %e, "Failed to read login response");
            e
        })?;

        let result = self
            .interpreter
            .login_result(&PortalResponse::new(status, body));
        info!(
            student = student_id,
            success = result.is_success(),
            status = result.status(),
            "Portal login"
        );

        Ok(result)
    }

    async fn curriculum_result_by(
        &self,
        fetcher: &dyn DocumentFetcher,
        parser: &dyn EntryParser,
        query: &CourseQuery,
    ) -> AppResult<PortalResult> {
        let target = query.target();

        let document = fetcher.fetch_document(target).await.map_err(|e| {
            error!(student = target, error = %e, "Failed to fetch curriculum listing");
            e
        })?;

        let entries = parser.parse_entries(&document);
        debug!(student = target, terms = entries.len(), "Parsed curriculum listing");

        Ok(self.interpreter.curriculum_result(entries))
    }

    async fn info_result_by(
        &self,
        fetcher: &dyn RowFetcher,
        parser: &dyn CourseParser,
        query: &CourseQuery,
    ) -> AppResult<PortalResult> {
        let target = query.target();
        let (year, semester) = (query.year(), query.semester());

        let rows = fetcher
            .fetch_rows(target, year, semester)
            .await
            .map_err(|e| {
                error!(
                    student = target,
                    year,
                    semester,
                    error = %e,
                    "Failed to fetch course table"
                );
                e
            })?;

        if rows.is_empty() {
            debug!(student = target, year, semester, "Course table is empty");
            return Ok(self.no_data_result());
        }

        let courses = parser.parse_courses(&rows);
        debug!(student = target, courses = courses.len(), "Parsed course table");

        Ok(self.interpreter.course_result(courses))
    }

    fn no_data_result(&self) -> PortalResult {
        PortalResult::no_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{
        CurriculumDocument, InfoRow, MockCourseParser, MockDocumentFetcher, MockEntryParser,
        MockRowFetcher,
    };
    use crate::repository::MockResponseInterpreter;
    use common::AppError;
    use domain::{CourseInfo, Curriculum, NO_DATA_MESSAGE};
    use serde_json::json;

    fn resolver(interpreter: MockResponseInterpreter) -> ResultResolver {
        ResultResolver::new(
            Arc::new(interpreter),
            Arc::new(PortalConfig::with_base_url("http://portal.test")),
        )
    }

    fn listing() -> CurriculumDocument {
        CurriculumDocument("<a href=\"?year=110&sem=1\">110-1</a>".to_string())
    }

    #[tokio::test]
    async fn test_curriculum_defaults_target_to_student() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch_document()
            .withf(|target| target == "A123")
            .times(1)
            .returning(|_| Ok(listing()));

        let mut parser = MockEntryParser::new();
        parser
            .expect_parse_entries()
            .times(1)
            .returning(|_| vec![Curriculum::new("110", "1")]);

        let mut interpreter = MockResponseInterpreter::new();
        interpreter
            .expect_curriculum_result()
            .withf(|entries| entries == &vec![Curriculum::new("110", "1")])
            .returning(|_| PortalResult::ok(json!([{"year": "110", "semester": "1"}])));

        let result = resolver(interpreter)
            .curriculum_result_by(&fetcher, &parser, &CourseQuery::new("A123"))
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.status(), 200);
    }

    #[tokio::test]
    async fn test_curriculum_uses_explicit_target() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch_document()
            .withf(|target| target == "B456")
            .times(1)
            .returning(|_| Ok(listing()));

        let mut parser = MockEntryParser::new();
        parser.expect_parse_entries().returning(|_| Vec::new());

        let mut interpreter = MockResponseInterpreter::new();
        interpreter
            .expect_curriculum_result()
            .returning(|_| PortalResult::ok(json!([])));

        let query = CourseQuery::new("A123").with_target("B456");
        let result = resolver(interpreter)
            .curriculum_result_by(&fetcher, &parser, &query)
            .await;

        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_curriculum_fetch_failure_yields_no_result() {
        let mut fetcher = MockDocumentFetcher::new();
        fetcher
            .expect_fetch_document()
            .returning(|_| Err(AppError::fetch("GET Select.jsp returned HTTP 500")));

        // Parser and interpreter must not be reached
        let parser = MockEntryParser::new();
        let interpreter = MockResponseInterpreter::new();

        let result = resolver(interpreter)
            .curriculum_result_by(&fetcher, &parser, &CourseQuery::new("A123"))
            .await;

        assert!(matches!(result, Err(AppError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_info_zero_rows_is_no_data() {
        let mut fetcher = MockRowFetcher::new();
        fetcher
            .expect_fetch_rows()
            .withf(|target, year, semester| target == "A123" && year == "114" && semester == "1")
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let parser = MockCourseParser::new();
        let interpreter = MockResponseInterpreter::new();

        let query = CourseQuery::new("A123").with_term("114", "1");
        let result = resolver(interpreter)
            .info_result_by(&fetcher, &parser, &query)
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.status(), 400);
        assert_eq!(result.data(), &json!(NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn test_info_parses_rows_into_courses() {
        let mut fetcher = MockRowFetcher::new();
        fetcher
            .expect_fetch_rows()
            .withf(|target, year, semester| target == "B456" && year.is_empty() && semester.is_empty())
            .returning(|_, _, _| Ok(vec![InfoRow::new(vec!["291704".to_string()])]));

        let mut parser = MockCourseParser::new();
        parser.expect_parse_courses().times(1).returning(|rows| {
            rows.iter()
                .map(|row| CourseInfo {
                    id: row.cell(0).to_string(),
                    ..Default::default()
                })
                .collect()
        });

        let mut interpreter = MockResponseInterpreter::new();
        interpreter
            .expect_course_result()
            .withf(|courses| courses.len() == 1 && courses[0].id == "291704")
            .returning(|_| PortalResult::ok(json!([{"id": "291704"}])));

        let query = CourseQuery::new("A123").with_target("B456");
        let result = resolver(interpreter)
            .info_result_by(&fetcher, &parser, &query)
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.status(), 200);
    }

    #[tokio::test]
    async fn test_info_fetch_failure_propagates() {
        let mut fetcher = MockRowFetcher::new();
        fetcher
            .expect_fetch_rows()
            .returning(|_, _, _| Err(AppError::transport("connection reset")));

        let result = resolver(MockResponseInterpreter::new())
            .info_result_by(&fetcher, &MockCourseParser::new(), &CourseQuery::new("A123"))
            .await;

        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_login_unreachable_portal_is_transport_error() {
        let resolver = ResultResolver::new(
            Arc::new(MockResponseInterpreter::new()),
            Arc::new(PortalConfig::with_base_url("http://127.0.0.1:1")),
        );

        let result = resolver
            .login_result(&Client::new(), "A123", "secret")
            .await;

        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[test]
    fn test_no_data_result_is_idempotent() {
        let resolver = resolver(MockResponseInterpreter::new());

        assert_eq!(resolver.no_data_result(), resolver.no_data_result());
        assert_eq!(resolver.no_data_result(), PortalResult::no_data());
    }
}
