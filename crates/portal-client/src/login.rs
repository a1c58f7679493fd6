//! Login form state and submission flow.
//!
//! Submitting posts the credentials, stores the session on success and sends
//! the user to the protected route. Every failure ends in a user-visible
//! message on the form; nothing here is fatal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::AuthClient;
use crate::error::ClientError;
use crate::navigation::Navigator;
use crate::session::AuthState;
use crate::types::{LoginRequest, LoginResponse, User};

/// Shown when the service rejects the login without a message, or answers
/// with an incomplete success.
pub const LOGIN_FAILED: &str = "Login failed";

/// Shown when the service cannot be reached or answers with garbage.
pub const CONNECTION_FAILED: &str = "Unable to connect to authentication service. Please try again.";

/// Called with the user after a successful login.
pub type OnLogin = Arc<dyn Fn(&User) + Send + Sync>;

/// How a login attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The service accepted the credentials.
    Authenticated { token: String, user: User },
    /// The attempt failed; the message is what the form shows.
    Failed(String),
}

/// Map a service result to an outcome.
pub fn resolve(result: Result<LoginResponse, ClientError>) -> LoginOutcome {
    match result {
        Ok(LoginResponse {
            success: true,
            token: Some(token),
            user: Some(user),
            ..
        }) => LoginOutcome::Authenticated { token, user },
        Ok(LoginResponse { success: true, .. }) => {
            warn!("login succeeded without token or user");
            LoginOutcome::Failed(LOGIN_FAILED.to_owned())
        }
        Ok(LoginResponse { message, .. }) => LoginOutcome::Failed(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED.to_owned()),
        ),
        Err(e) => {
            warn!(error = %e, "login request failed");
            LoginOutcome::Failed(CONNECTION_FAILED.to_owned())
        }
    }
}

/// The login form.
#[derive(Default)]
pub struct LoginForm {
    email: String,
    password: String,
    is_loading: bool,
    error: Option<String>,
    on_login: Option<OnLogin>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run after a successful login, before navigating.
    #[must_use]
    pub fn with_on_login(mut self, on_login: impl Fn(&User) + Send + Sync + 'static) -> Self {
        self.on_login = Some(Arc::new(on_login));
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Edit the email field. Clears any shown error.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.error = None;
    }

    /// Edit the password field. Clears any shown error.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.error = None;
    }

    /// Replace both fields at once, e.g. from a list of demo accounts.
    pub fn fill(&mut self, email: impl Into<String>, password: impl Into<String>) {
        self.email = email.into();
        self.password = password.into();
        self.error = None;
    }

    /// Enter the loading state and return the request to send. Returns `None`
    /// while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        self.error = None;
        Some(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Leave the loading state, showing the failure message if any.
    pub fn finish_submit(&mut self, outcome: &LoginOutcome) {
        self.is_loading = false;
        self.error = match outcome {
            LoginOutcome::Authenticated { .. } => None,
            LoginOutcome::Failed(message) => Some(message.clone()),
        };
    }

    /// Run a full login: post, store the session, notify and navigate.
    ///
    /// Returns the signed-in user, or `None` with [`LoginForm::error`] set.
    pub async fn submit(
        &mut self,
        client: &AuthClient,
        session: &AuthState,
        navigator: &dyn Navigator,
    ) -> Option<User> {
        let request = self.begin_submit()?;
        let mut outcome = resolve(client.login(&request).await);

        if let LoginOutcome::Authenticated { token, user } = &outcome {
            if let Err(e) = session.store_session(token, user).await {
                warn!(error = %e, "failed to store session");
                outcome = LoginOutcome::Failed(CONNECTION_FAILED.to_owned());
            }
        }

        self.finish_submit(&outcome);

        match outcome {
            LoginOutcome::Authenticated { user, .. } => {
                info!(user = %user.email, role = %user.role, "login succeeded");
                if let Some(on_login) = &self.on_login {
                    on_login(&user);
                }
                navigator.push(&client.config().protected_route);
                Some(user)
            }
            LoginOutcome::Failed(_) => None,
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("is_loading", &self.is_loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
