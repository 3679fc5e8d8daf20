//! Comment API client methods

use super::{ClientError, ForumClient};
use crate::types::{Comment, CommentCreatedResponse, CommentData, CommentsResponse, MessageResponse};
use reqwest::Method;

impl ForumClient {
    /// Comments on a thread, oldest first
    pub async fn list_comments(&self, thread_id: i64) -> Result<Vec<Comment>, ClientError> {
        let req = self.request(Method::GET, &format!("/threads/{thread_id}/comments"));
        let response: CommentsResponse = self.execute(req).await?;
        Ok(response.comments.unwrap_or_default())
    }

    /// Add a comment; the server echoes the stored comment back
    pub async fn post_comment(
        &self,
        thread_id: i64,
        comment: &CommentData,
    ) -> Result<Comment, ClientError> {
        let req = self
            .request(Method::POST, &format!("/threads/{thread_id}/comments"))
            .json(comment);
        let response: CommentCreatedResponse = self.execute(req).await?;
        Ok(response.comment)
    }

    pub async fn edit_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
        comment: &CommentData,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(
                Method::PUT,
                &format!("/threads/{thread_id}/comments/{comment_id}"),
            )
            .json(comment);
        self.execute(req).await
    }

    pub async fn delete_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        let req = self.request(
            Method::DELETE,
            &format!("/threads/{thread_id}/comments/{comment_id}"),
        );
        self.execute(req).await
    }
}
