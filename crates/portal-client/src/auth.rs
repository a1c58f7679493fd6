//! HTTP client for the portal's authentication service.

use tracing::debug;

use crate::config::PortalConfig;
use crate::error::ClientError;
use crate::types::{LoginRequest, LoginResponse};

/// Talks to the login endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: PortalConfig,
    client: reqwest::Client,
}

impl AuthClient {
    /// Build a client for the configured portal.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is empty, or
    /// [`ClientError::Network`] if the HTTP client cannot be built.
    pub fn new(config: PortalConfig) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::Config(
                "missing base URL, set PORTAL_BASE_URL".to_owned(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("portal-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Post credentials to the login endpoint.
    ///
    /// The service reports rejections in the body, so any status with a JSON
    /// body is returned as a [`LoginResponse`]; callers decide what
    /// `success: false` means.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Timeout`] or [`ClientError::Network`] if the
    /// service is unreachable, [`ClientError::Json`] if a successful response
    /// is not a login response, or [`ClientError::Api`] for an error status
    /// without one.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let url = self.config.login_url();
        debug!(%url, email = %request.email, "posting login");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout
                } else {
                    ClientError::Network(e)
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(ClientError::Network)?;

        match serde_json::from_str::<LoginResponse>(&text) {
            Ok(body) => Ok(body),
            Err(e) if status.is_success() => Err(ClientError::Json(e)),
            Err(_) => Err(ClientError::Api {
                status_code: status.as_u16(),
                message: if text.is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    text
                },
            }),
        }
    }
}
