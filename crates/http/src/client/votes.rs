//! Vote API client methods

use super::{ClientError, ForumClient};
use crate::types::{MessageResponse, VoteCount, VoteData, VoteDirection, VoteState};
use reqwest::Method;

impl ForumClient {
    /// Cast or replace the caller's vote
    pub async fn cast_vote(
        &self,
        thread_id: i64,
        vote: VoteDirection,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, &format!("/threads/{thread_id}/votes"))
            .json(&VoteData { vote });
        self.execute(req).await
    }

    /// Remove the caller's vote
    pub async fn retract_vote(&self, thread_id: i64) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::DELETE, &format!("/threads/{thread_id}/votes"));
        self.execute(req).await
    }

    /// Net score of a thread
    pub async fn count_votes(&self, thread_id: i64) -> Result<VoteCount, ClientError> {
        let req = self.request(Method::GET, &format!("/threads/{thread_id}/votes"));
        self.execute(req).await
    }

    /// How `username` voted on a thread
    pub async fn vote_state(
        &self,
        username: &str,
        thread_id: i64,
    ) -> Result<VoteState, ClientError> {
        let req = self.request(Method::GET, &format!("/{username}/{thread_id}/vote_state"));
        self.execute(req).await
    }
}
