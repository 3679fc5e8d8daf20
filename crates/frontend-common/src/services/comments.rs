//! Comments on a thread

use super::api_wrapper::{ApiOutcome, into_outcome, with_auth_error_handling};
use super::{ForumApi, LOGIN_TO_CONTINUE_MESSAGE};
use crate::store::Action;
use forum_core::forms::validate_comment;
use forum_http::types::{Comment, CommentData};

impl ForumApi {
    pub async fn list_comments(&self, thread_id: i64) -> ApiOutcome<Vec<Comment>> {
        into_outcome(
            self.client.list_comments(thread_id).await,
            "Comments fetched successfully",
        )
    }

    /// Add a comment and close the comment dialog once it is stored
    pub async fn post_comment(&self, thread_id: i64, content: &str) -> ApiOutcome<Comment> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }
        if let Err(errors) = validate_comment(content) {
            return ApiOutcome::invalid(errors);
        }

        let body = CommentData {
            content: content.to_string(),
        };
        let outcome = with_auth_error_handling(
            &self.store,
            self.client.post_comment(thread_id, &body),
            "Comment posted successfully",
        )
        .await;
        if outcome.success {
            self.store.dispatch(Action::CloseCommentDialog);
        }
        self.report(&outcome, "Comment posted", "Comment failed: ");
        outcome
    }

    pub async fn edit_comment(
        &self,
        thread_id: i64,
        comment_id: i64,
        content: &str,
    ) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }
        if let Err(errors) = validate_comment(content) {
            return ApiOutcome::invalid(errors);
        }

        let body = CommentData {
            content: content.to_string(),
        };
        let outcome = with_auth_error_handling(
            &self.store,
            async {
                self.client
                    .edit_comment(thread_id, comment_id, &body)
                    .await
                    .map(|_| ())
            },
            "Comment edited successfully",
        )
        .await;
        self.report(&outcome, "Comment updated", "Update failed: ");
        outcome
    }

    pub async fn delete_comment(&self, thread_id: i64, comment_id: i64) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async {
                self.client
                    .delete_comment(thread_id, comment_id)
                    .await
                    .map(|_| ())
            },
            "Comment deleted successfully",
        )
        .await;
        self.report(&outcome, "Comment deleted", "Deletion failed: ");
        outcome
    }
}
