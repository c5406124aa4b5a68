//! Portal HTTP sessions and login request construction.

use std::sync::Arc;

use reqwest::header::{REFERER, USER_AGENT};
use reqwest::{Client, Request};
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{
    FIELD_FORCE_MOBILE, FIELD_PASSWORD, FIELD_STUDENT_ID, FORCE_MOBILE, MOBILE_USER_AGENT,
};

use super::sign_on::SignOnForm;
use crate::config::PortalConfig;

/// Build the login POST for one set of credentials.
///
/// The body is form-encoded as `muid`, `mpassword`, `forceMobile` in that
/// order. Credentials are passed through untouched; the portal decides
/// whether they are valid.
pub fn build_login_request(
    client: &Client,
    config: &PortalConfig,
    student_id: &str,
    password: &str,
) -> AppResult<Request> {
    let form = [
        (FIELD_STUDENT_ID, student_id),
        (FIELD_PASSWORD, password),
        (FIELD_FORCE_MOBILE, FORCE_MOBILE),
    ];

    let request = client
        .post(&config.login_url)
        .header(REFERER, &config.index_url)
        .header(USER_AGENT, MOBILE_USER_AGENT)
        .form(&form)
        .build()?;

    Ok(request)
}

/// Factory for portal sessions.
#[derive(Clone)]
pub struct PortalClient {
    config: Arc<PortalConfig>,
    probe_http: Client,
}

impl PortalClient {
    /// Create a client factory for the configured portal
    pub fn new(config: Arc<PortalConfig>) -> AppResult<Self> {
        let probe_http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { config, probe_http })
    }

    /// Open a fresh session with its own cookie jar.
    ///
    /// One session per API call: cookies never leak between students.
    pub fn open_session(&self) -> AppResult<PortalSession> {
        let http = Client::builder()
            .cookie_store(true)
            .connect_timeout(self.config.connect_timeout())
            .timeout(self.config.request_timeout())
            .build()?;

        Ok(PortalSession {
            http,
            config: self.config.clone(),
        })
    }

    /// Check that the portal index page answers.
    pub async fn probe(&self) -> AppResult<()> {
        let response = self.probe_http.get(&self.config.index_url).send().await?;
        let status = response.status();

        if status.is_server_error() {
            warn!(%status, "Portal probe returned a server error");
            return Err(AppError::service_unavailable("portal"));
        }

        Ok(())
    }
}

/// Cookie-carrying HTTP session against the portal.
pub struct PortalSession {
    http: Client,
    config: Arc<PortalConfig>,
}

impl PortalSession {
    /// Underlying HTTP client, shared by every request of this session
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Single sign-on from the portal into the course system.
    ///
    /// The portal answers the sign-on page with a self-submitting form; it is
    /// replayed here so the course system sets its own session cookies.
    pub async fn enter_course_system(&self) -> AppResult<()> {
        let page = self.get_page(&self.config.sso_url, &[]).await?;
        let form = SignOnForm::parse(&page, &self.config.sso_url)?;

        debug!(
            action = %form.action,
            fields = form.fields.len(),
            "Submitting course system sign-on form"
        );

        let response = self
            .http
            .post(form.action.as_str())
            .form(&form.fields)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(format!(
                "course system sign-on returned HTTP {}",
                status
            )));
        }

        Ok(())
    }

    /// GET a page and return its body.
    ///
    /// Fails with `Transport` when the portal cannot be reached and with
    /// `Fetch` when it answers with a non-2xx status.
    pub async fn get_page(&self, url: &str, query: &[(&str, &str)]) -> AppResult<String> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::fetch(format!("GET {} returned HTTP {}", url, status)));
        }

        Ok(response.text().await?)
    }
}
