//! Portal service - Handles the student-facing portal operations.
//!
//! Every operation runs in its own portal session: log in, enter the course
//! system when needed, then hand the session to the usecase.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use common::AppResult;
use domain::{CourseQuery, PortalResult};

use crate::client::{PortalClient, PortalSession};
use crate::crawler::{CourseTableParser, CurriculumParser};
use crate::usecase::ResultUsecase;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Portal service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PortalService: Send + Sync {
    /// Check the student's credentials against the portal
    async fn login(&self, student_id: &str, password: &str) -> AppResult<PortalResult>;

    /// Terms the queried student has courses in
    async fn curriculums(&self, query: &CourseQuery, password: &str) -> AppResult<PortalResult>;

    /// Courses of the queried student for one term
    async fn courses(&self, query: &CourseQuery, password: &str) -> AppResult<PortalResult>;

    /// Whether the portal currently answers
    async fn portal_status(&self) -> AppResult<()>;
}

/// Concrete implementation of PortalService.
pub struct PortalManager {
    client: PortalClient,
    usecase: Arc<dyn ResultUsecase>,
    curriculum_parser: CurriculumParser,
    course_parser: CourseTableParser,
}

/// Either a session inside the course system or the login result that
/// stopped us getting there
enum SignOn {
    Ready(PortalSession),
    Rejected(PortalResult),
}

impl PortalManager {
    /// Create new portal service instance
    pub fn new(client: PortalClient, usecase: Arc<dyn ResultUsecase>) -> Self {
        Self {
            client,
            usecase,
            curriculum_parser: CurriculumParser,
            course_parser: CourseTableParser,
        }
    }

    async fn sign_on(&self, student_id: &str, password: &str) -> AppResult<SignOn> {
        let session = self.client.open_session()?;

        let login = self
            .usecase
            .login_result(session.http(), student_id, password)
            .await?;
        if !login.is_success() {
            return Ok(SignOn::Rejected(login));
        }

        session.enter_course_system().await?;
        debug!(student = student_id, "Entered course system");

        Ok(SignOn::Ready(session))
    }
}

#[async_trait]
impl PortalService for PortalManager {
    async fn login(&self, student_id: &str, password: &str) -> AppResult<PortalResult> {
        let session = self.client.open_session()?;
        self.usecase
            .login_result(session.http(), student_id, password)
            .await
    }

    async fn curriculums(&self, query: &CourseQuery, password: &str) -> AppResult<PortalResult> {
        match self.sign_on(&query.student_id, password).await? {
            SignOn::Ready(session) => {
                self.usecase
                    .curriculum_result_by(&session, &self.curriculum_parser, query)
                    .await
            }
            SignOn::Rejected(result) => Ok(result),
        }
    }

    async fn courses(&self, query: &CourseQuery, password: &str) -> AppResult<PortalResult> {
        match self.sign_on(&query.student_id, password).await? {
            SignOn::Ready(session) => {
                self.usecase
                    .info_result_by(&session, &self.course_parser, query)
                    .await
            }
            SignOn::Rejected(result) => Ok(result),
        }
    }

    async fn portal_status(&self) -> AppResult<()> {
        self.client.probe().await
    }
}
