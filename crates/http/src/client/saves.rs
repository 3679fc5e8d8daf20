//! Saved-thread API client methods

use super::{ClientError, ForumClient};
use crate::types::{MessageResponse, SavedState};
use reqwest::Method;

impl ForumClient {
    /// Bookmark a thread for the caller
    pub async fn save_thread(&self, thread_id: i64) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::POST, &format!("/threads/{thread_id}/saves"));
        self.execute(req).await
    }

    pub async fn unsave_thread(&self, thread_id: i64) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::DELETE, &format!("/threads/{thread_id}/saves"));
        self.execute(req).await
    }

    /// Whether the caller has bookmarked a thread
    pub async fn is_saved(&self, thread_id: i64) -> Result<SavedState, ClientError> {
        let req = self.request(Method::GET, &format!("/threads/{thread_id}/saves"));
        self.execute(req).await
    }
}
