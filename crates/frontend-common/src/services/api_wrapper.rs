//! Normalization of API call results
//!
//! Every service operation resolves to an [`ApiOutcome`]; transport, server
//! and validation failures all end up in the same shape.

use crate::store::snackbar::Severity;
use crate::store::{Action, AppStore};
use forum_core::FieldErrors;
use forum_http::ClientError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shown when a request never got an answer
pub const NO_CONNECTION_MESSAGE: &str = "No response from server, please check your connection.";

/// Shown for failures that are neither the server's nor the network's
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send request. Please try again.";

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please login again.";

/// Uniform result of a service operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOutcome<T> {
    pub success: bool,
    pub message: String,
    pub payload: Option<T>,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub field_errors: FieldErrors,
}

impl<T> ApiOutcome<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
            field_errors: FieldErrors::new(),
        }
    }

    /// Rejected before reaching the network
    pub fn invalid(field_errors: FieldErrors) -> Self {
        let message = field_errors
            .iter()
            .next()
            .map(|(_, message)| message.to_string())
            .unwrap_or_default();
        Self {
            success: false,
            message,
            payload: None,
            field_errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        ApiOutcome {
            success: self.success,
            message: self.message,
            payload: self.payload.map(f),
            field_errors: self.field_errors,
        }
    }

    /// Payload of a successful outcome
    pub fn into_payload(self) -> Option<T> {
        if self.success { self.payload } else { None }
    }
}

/// User-facing message for a failed call
pub fn failure_message(error: &ClientError) -> String {
    if let Some(message) = error.server_message() {
        message.to_string()
    } else if error.is_connection_failure() {
        NO_CONNECTION_MESSAGE.to_string()
    } else {
        GENERIC_FAILURE_MESSAGE.to_string()
    }
}

/// Collapse a client result into an outcome
pub fn into_outcome<T>(
    result: Result<T, ClientError>,
    success_message: impl Into<String>,
) -> ApiOutcome<T> {
    match result {
        Ok(payload) => ApiOutcome::ok(success_message, payload),
        Err(error) => {
            match error.status() {
                Some(status) => debug!("Server rejected request ({status}): {error}"),
                None => warn!("Request failed: {error}"),
            }
            ApiOutcome::failure(failure_message(&error))
        }
    }
}

/// Show the outcome's message in the snackbar
pub fn notify_outcome<T>(store: &AppStore, outcome: &ApiOutcome<T>) {
    let severity = if outcome.success {
        Severity::Success
    } else {
        Severity::Error
    };
    store.notify(outcome.message.clone(), severity);
}

/// Prompt for a fresh login when an authenticated call was rejected
pub fn handle_api_error(error: &ClientError, store: &AppStore) {
    if error.is_auth_expired() && store.session().is_logged_in {
        store.dispatch(Action::OpenLoginDialog);
        store.notify(SESSION_EXPIRED_MESSAGE, Severity::Warning);
    }
}

/// [`into_outcome`] for calls made on behalf of the logged-in user
pub async fn with_auth_error_handling<T, F>(
    store: &AppStore,
    api_call: F,
    success_message: impl Into<String>,
) -> ApiOutcome<T>
where
    F: std::future::Future<Output = Result<T, ClientError>>,
{
    let result = api_call.await;
    if let Err(error) = &result {
        handle_api_error(error, store);
    }
    into_outcome(result, success_message)
}
