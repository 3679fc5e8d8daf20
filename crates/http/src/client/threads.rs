//! Thread API client methods

use super::{ClientError, ForumClient};
use crate::types::{MessageResponse, PostData, Thread, ThreadQuery, ThreadResponse, ThreadsResponse};
use reqwest::Method;

impl ForumClient {
    /// One page of threads matching the query
    pub async fn list_threads(&self, query: &ThreadQuery) -> Result<Vec<Thread>, ClientError> {
        let req = self.request(Method::GET, "/threads").query(query);
        let response: ThreadsResponse = self.execute(req).await?;
        Ok(response.threads.unwrap_or_default())
    }

    pub async fn get_thread(&self, thread_id: i64) -> Result<Thread, ClientError> {
        let req = self.request(Method::GET, &format!("/threads/{thread_id}"));
        let response: ThreadResponse = self.execute(req).await?;
        Ok(response.thread)
    }

    pub async fn post_thread(&self, post: &PostData) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::POST, "/threads/post").json(post);
        self.execute(req).await
    }

    pub async fn edit_thread(
        &self,
        thread_id: i64,
        post: &PostData,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/threads/{thread_id}"))
            .json(post);
        self.execute(req).await
    }

    pub async fn delete_thread(&self, thread_id: i64) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::DELETE, &format!("/threads/{thread_id}"));
        self.execute(req).await
    }
}
