//! User profile API client methods

use super::{ClientError, ForumClient};
use crate::types::{MessageResponse, ProfileUpdate, UserProfile};
use reqwest::Method;

impl ForumClient {
    pub async fn get_profile(&self, username: &str) -> Result<UserProfile, ClientError> {
        let req = self.request(Method::GET, &format!("/user/{username}"));
        self.execute(req).await
    }

    /// Update the profile of `username`, which must be the token's subject
    pub async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/user/{username}"))
            .json(update);
        self.execute(req).await
    }
}
