//! Login, signup and logout

use super::ForumApi;
use super::api_wrapper::{ApiOutcome, GENERIC_FAILURE_MESSAGE, into_outcome, notify_outcome};
use crate::auth::Session;
use crate::store::Action;
use crate::store::snackbar::Severity;
use forum_core::{LoginForm, SignupForm};
use forum_http::types::{LoginRequest, SignupRequest};
use tracing::{info, warn};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login Successful!";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful!";
pub const LOGOUT_MESSAGE: &str = "Logged out successfully";

impl ForumApi {
    /// Exchange credentials for a token, store it and sync the session
    pub async fn login(&self, username: &str, password: &str) -> ApiOutcome<Session> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        if let Err(errors) = form.validate() {
            return ApiOutcome::invalid(errors);
        }

        let request = LoginRequest {
            username: form.username,
            password: form.password,
        };
        let outcome = match self.client.login(&request).await {
            Ok(response) => self.establish_session(&response.token),
            Err(error) => into_outcome(Err(error), ""),
        };

        if outcome.success {
            self.store.dispatch(Action::CloseLoginDialog);
        }
        notify_outcome(&self.store, &outcome);
        outcome
    }

    fn establish_session(&self, token: &str) -> ApiOutcome<Session> {
        if let Err(e) = self.tokens.set(token) {
            warn!("Failed to store token: {e}");
            return ApiOutcome::failure(GENERIC_FAILURE_MESSAGE);
        }

        let session = self.session.sync();
        if !session.is_logged_in {
            warn!("Server issued a token that does not decode to a live session");
            if let Err(e) = self.tokens.clear() {
                warn!("Failed to remove rejected token: {e}");
            }
            return ApiOutcome::failure(GENERIC_FAILURE_MESSAGE);
        }

        info!("Logged in as {}", session.username.as_deref().unwrap_or_default());
        ApiOutcome::ok(LOGIN_SUCCESS_MESSAGE, session)
    }

    /// Create an account; does not log in
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> ApiOutcome<()> {
        let form = SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        if let Err(errors) = form.validate() {
            return ApiOutcome::invalid(errors);
        }

        let request = SignupRequest {
            username: form.username,
            email: form.email,
            password: form.password,
        };
        let result = self.client.signup(&request).await.map(|_| ());
        let outcome = into_outcome(result, SIGNUP_SUCCESS_MESSAGE);
        notify_outcome(&self.store, &outcome);
        outcome
    }

    /// Forget the token and session; never touches the network
    pub fn logout(&self) -> ApiOutcome<Session> {
        let session = self.session.logout();
        self.store.dispatch(Action::CloseProfileMenu);
        self.store.notify(LOGOUT_MESSAGE, Severity::Info);
        ApiOutcome::ok(LOGOUT_MESSAGE, session)
    }
}
