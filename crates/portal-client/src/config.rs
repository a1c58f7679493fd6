//! Portal client configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::time::Duration;

/// Default portal origin.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default login endpoint path.
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";

/// Default route opened after a successful login.
pub const DEFAULT_PROTECTED_ROUTE: &str = "/portal";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the portal lives and how to reach its auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Portal origin, without a trailing slash.
    pub base_url: String,
    /// Path of the login endpoint, starting with `/`.
    pub login_path: String,
    /// Route to navigate to after signing in.
    pub protected_route: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            protected_route: DEFAULT_PROTECTED_ROUTE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORTAL_BASE_URL`: portal origin (default: `http://127.0.0.1:3000`)
    /// - `PORTAL_LOGIN_PATH`: login endpoint (default: `/api/auth/login`)
    /// - `PORTAL_PROTECTED_ROUTE`: post-login route (default: `/portal`)
    /// - `PORTAL_TIMEOUT_SECS`: request timeout, `0` for the default (default: `10`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let timeout = lookup("PORTAL_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            base_url: value("PORTAL_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            login_path: with_leading_slash(value("PORTAL_LOGIN_PATH", DEFAULT_LOGIN_PATH)),
            protected_route: with_leading_slash(value(
                "PORTAL_PROTECTED_ROUTE",
                DEFAULT_PROTECTED_ROUTE,
            )),
            timeout,
        }
    }

    /// Full URL of the login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }
}

fn with_leading_slash(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
