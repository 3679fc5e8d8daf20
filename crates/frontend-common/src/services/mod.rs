//! API services
//!
//! [`ForumApi`] wraps the HTTP client and turns each call into an
//! [`ApiOutcome`], keeping the session and UI state in the [`AppStore`] up
//! to date along the way.

pub mod api_wrapper;
pub mod auth;
pub mod comments;
pub mod saves;
pub mod threads;
pub mod users;
pub mod votes;

pub use api_wrapper::{ApiOutcome, into_outcome};

use crate::auth::{Session, SessionSynchronizer};
use crate::store::AppStore;
use crate::store::snackbar::Severity;
use forum_core::{ClientConfig, TokenStore};
use forum_http::{ClientError, ForumClient};
use std::sync::Arc;
use tracing::debug;

/// Shown when creating or editing a thread while logged out
pub const LOGIN_TO_POST_MESSAGE: &str = "Please login to post";

/// Shown for any other action that needs a session
pub const LOGIN_TO_CONTINUE_MESSAGE: &str = "Please login to continue";

/// Forum operations bound to one token store and one app store
#[derive(Clone)]
pub struct ForumApi {
    client: ForumClient,
    tokens: Arc<dyn TokenStore>,
    store: AppStore,
    session: Arc<SessionSynchronizer>,
}

impl std::fmt::Debug for ForumApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumApi")
            .field("client", &self.client)
            .field("session", &self.session)
            .finish()
    }
}

impl ForumApi {
    /// Build a client from configuration that authenticates with `tokens`
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        store: AppStore,
    ) -> Result<Self, ClientError> {
        let mut builder = ForumClient::builder()
            .base_url(config.base_url.clone())
            .token_store(Arc::clone(&tokens));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, tokens, store))
    }

    /// Use an already built client; it should read from the same `tokens`
    pub fn with_client(client: ForumClient, tokens: Arc<dyn TokenStore>, store: AppStore) -> Self {
        let session = Arc::new(SessionSynchronizer::new(Arc::clone(&tokens), store.clone()));
        Self {
            client,
            tokens,
            store,
            session,
        }
    }

    pub fn client(&self) -> &ForumClient {
        &self.client
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn session(&self) -> &SessionSynchronizer {
        &self.session
    }

    /// Re-derive the session from the stored token
    pub fn sync(&self) -> Session {
        self.session.sync()
    }

    /// Username of a live session, or a failed outcome explaining why not
    fn require_login<T>(&self, message: &str) -> Result<String, ApiOutcome<T>> {
        let session = self.store.session();
        let now = chrono::Utc::now().timestamp();
        match session.user() {
            Some(username) if session.is_valid_at(now) => Ok(username.to_string()),
            _ => {
                debug!("Rejected without a session: {message}");
                self.store.notify(message, Severity::Info);
                Err(ApiOutcome::failure(message))
            }
        }
    }

    /// Snackbar for a user action: a fixed text on success, the outcome's
    /// message behind `failure_prefix` otherwise
    fn report<T>(&self, outcome: &ApiOutcome<T>, success: &str, failure_prefix: &str) {
        if outcome.success {
            self.store.notify(success, Severity::Success);
        } else {
            self.store
                .notify(format!("{failure_prefix}{}", outcome.message), Severity::Error);
        }
    }
}
