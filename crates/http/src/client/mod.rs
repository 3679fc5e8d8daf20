//! Forum HTTP client

pub mod auth;
pub mod comments;
pub mod error;
pub mod saves;
pub mod threads;
pub mod users;
pub mod votes;

use error::ClientError;
use forum_core::TokenStore;
use reqwest::{Client, ClientBuilder, header};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Forum API client
///
/// The bearer token is read from the token store on every request, so a
/// login or logout elsewhere is picked up by the next call.
#[derive(Clone)]
pub struct ForumClient {
    client: Client,
    base_url: String,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl std::fmt::Debug for ForumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumClient")
            .field("base_url", &self.base_url)
            .field("has_token_store", &self.token_store.is_some())
            .finish()
    }
}

impl ForumClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ForumClientBuilder {
        ForumClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store backing the Authorization header, if any
    pub fn token_store(&self) -> Option<&Arc<dyn TokenStore>> {
        self.token_store.as_ref()
    }

    /// Current bearer token; storage failures read as "no token"
    fn current_token(&self) -> Option<String> {
        let store = self.token_store.as_ref()?;
        match store.get() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read stored token: {e}");
                None
            }
        }
    }

    /// Create a request builder, attaching the stored token when present
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");
        let mut request = self.client.request(method, url);

        if let Some(token) = self.current_token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::from_send)?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with {status}: {body}");
            Err(ClientError::from_response_body(status, &body))
        }
    }
}

/// Builder for ForumClient
#[derive(Default)]
pub struct ForumClientBuilder {
    base_url: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ForumClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Read bearer tokens from this store
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ForumClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(concat!(
                "forum-client/",
                env!("CARGO_PKG_VERSION")
            ));
        }

        let client = client_builder.build()?;

        Ok(ForumClient {
            client,
            base_url,
            token_store: self.token_store,
        })
    }
}
