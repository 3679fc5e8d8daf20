//! Authentication API client methods

use super::{ClientError, ForumClient};
use crate::types::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use reqwest::Method;

impl ForumClient {
    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = self.request(Method::POST, "/login").json(request);
        self.execute(req).await
    }

    /// Register a new account
    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::POST, "/signup").json(request);
        self.execute(req).await
    }
}
