//! Portal endpoint configuration.

use std::env;
use std::time::Duration;

use common::HttpClientConfig;

/// Default login endpoint of the student portal
pub const DEFAULT_LOGIN_URL: &str = "https://nportal.ntut.edu.tw/login.do";

/// Default portal index page, sent as the login referer
pub const DEFAULT_INDEX_URL: &str = "https://nportal.ntut.edu.tw/index.do";

/// Default single sign-on entry into the course system
pub const DEFAULT_SSO_URL: &str = "https://nportal.ntut.edu.tw/ssoIndex.do?apOu=aa_0010-&apUrl=https://aps.ntut.edu.tw/course/tw/courseSID.jsp";

/// Default course system query page
pub const DEFAULT_COURSE_URL: &str = "https://aps.ntut.edu.tw/course/tw/Select.jsp";

/// Portal endpoints and client settings.
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Login form target
    pub login_url: String,
    /// Index page (login referer, health probe)
    pub index_url: String,
    /// Course system sign-on page
    pub sso_url: String,
    /// Course system query page
    pub course_url: String,
    /// Outbound client timeouts
    pub http: HttpClientConfig,
}

impl PortalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = HttpClientConfig::default();

        Self {
            login_url: env::var("PORTAL_LOGIN_URL")
                .unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string()),
            index_url: env::var("PORTAL_INDEX_URL")
                .unwrap_or_else(|_| DEFAULT_INDEX_URL.to_string()),
            sso_url: env::var("PORTAL_SSO_URL").unwrap_or_else(|_| DEFAULT_SSO_URL.to_string()),
            course_url: env::var("PORTAL_COURSE_URL")
                .unwrap_or_else(|_| DEFAULT_COURSE_URL.to_string()),
            http: HttpClientConfig {
                connect_timeout_ms: env::var("PORTAL_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.connect_timeout_ms),
                request_timeout_ms: env::var("PORTAL_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.request_timeout_ms),
            },
        }
    }

    /// Point every endpoint at one base URL (used against mock portals).
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{}/login.do", base),
            index_url: format!("{}/index.do", base),
            sso_url: format!("{}/ssoIndex.do", base),
            course_url: format!("{}/course/tw/Select.jsp", base),
            http: HttpClientConfig::default(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.http.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.http.request_timeout_ms)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            sso_url: DEFAULT_SSO_URL.to_string(),
            course_url: DEFAULT_COURSE_URL.to_string(),
            http: HttpClientConfig::default(),
        }
    }
}
