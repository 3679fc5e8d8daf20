//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Message used when a failed response carries no `error` field
pub const UNEXPECTED_SERVER_ERROR: &str = "Unexpected server error occurred.";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response (refused, reset, timed out)
    #[error("Connection failed: {0}")]
    Connection(reqwest::Error),

    /// Request could not be built or its response body could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Shape of the backend's error responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Create error from a failed response body, preferring its `error` field
    pub fn from_response_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| UNEXPECTED_SERVER_ERROR.to_string());
        Self::from_status(status, message)
    }

    /// Classify an error returned by `RequestBuilder::send`
    pub fn from_send(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Request(error)
        } else {
            Self::Connection(error)
        }
    }

    /// The server's own explanation, when the server answered with an error status
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ServerError { message, .. }
            | Self::AuthenticationFailed(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Forbidden(message) => Some(message),
            _ => None,
        }
    }

    /// True when the request never reached the server
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// True when the server rejected the bearer token
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// HTTP status for errors the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            _ => None,
        }
    }
}
