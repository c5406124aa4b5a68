//! Translation of portal answers into `PortalResult`s.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use domain::{
    CourseInfo, Curriculum, PortalResult, INVALID_CREDENTIALS_MESSAGE, INVALID_CREDENTIALS_STATUS,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENCODE_FAILURE_STATUS: u16 = 500;
const ENCODE_FAILURE_MESSAGE: &str = "failed to encode portal data";

/// Status and body of a portal HTTP response, read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResponse {
    pub status: u16,
    pub body: String,
}

impl PortalResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Builds `PortalResult`s from what the portal returned.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ResponseInterpreter: Send + Sync {
    /// Interpret the answer to a login POST
    fn login_result(&self, response: &PortalResponse) -> PortalResult;

    /// Wrap the terms of a curriculum listing
    fn curriculum_result(&self, entries: Vec<Curriculum>) -> PortalResult;

    /// Wrap the courses of one term
    fn course_result(&self, courses: Vec<CourseInfo>) -> PortalResult;
}

/// JSON body the portal returns for mobile logins
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    success: bool,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    error_msg: Option<String>,
}

/// Default `ResponseInterpreter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRepository;

impl ResultRepository {
    pub fn new() -> Self {
        Self
    }

    fn encode<T: Serialize>(&self, kind: &str, data: &T) -> PortalResult {
        match serde_json::to_value(data) {
            Ok(value) => PortalResult::ok(value),
            Err(e) => {
                error!(kind, error = %e, "Failed to encode portal data");
                PortalResult::failure(ENCODE_FAILURE_STATUS, ENCODE_FAILURE_MESSAGE)
            }
        }
    }
}

impl ResponseInterpreter for ResultRepository {
    fn login_result(&self, response: &PortalResponse) -> PortalResult {
        if !(200..300).contains(&response.status) {
            return PortalResult::failure(
                response.status,
                format!("portal responded with HTTP {}", response.status),
            );
        }

        match serde_json::from_str::<LoginBody>(&response.body) {
            Ok(body) if body.success => PortalResult::ok(body.given_name.unwrap_or_default()),
            Ok(body) => PortalResult::failure(
                INVALID_CREDENTIALS_STATUS,
                body.error_msg
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
            ),
            Err(e) => {
                // Rejected credentials come back as an HTML page
                debug!(error = %e, "Login answer is not JSON");
                PortalResult::failure(INVALID_CREDENTIALS_STATUS, INVALID_CREDENTIALS_MESSAGE)
            }
        }
    }

    fn curriculum_result(&self, entries: Vec<Curriculum>) -> PortalResult {
        self.encode("curriculum", &entries)
    }

    fn course_result(&self, courses: Vec<CourseInfo>) -> PortalResult {
        self.encode("course", &courses)
    }
}
