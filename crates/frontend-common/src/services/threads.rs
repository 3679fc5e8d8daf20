//! Thread listing and authoring

use super::api_wrapper::{ApiOutcome, into_outcome, with_auth_error_handling};
use super::{ForumApi, LOGIN_TO_CONTINUE_MESSAGE, LOGIN_TO_POST_MESSAGE};
use forum_core::PostForm;
use forum_http::types::{PostData, Thread, ThreadQuery};

impl ForumApi {
    pub async fn list_threads(&self, query: &ThreadQuery) -> ApiOutcome<Vec<Thread>> {
        into_outcome(
            self.client.list_threads(query).await,
            "Threads fetched successfully",
        )
    }

    pub async fn get_thread(&self, thread_id: i64) -> ApiOutcome<Thread> {
        into_outcome(
            self.client.get_thread(thread_id).await,
            "Thread fetched successfully",
        )
    }

    /// Publish a new thread as the logged-in user
    pub async fn post_thread(&self, form: &PostForm) -> ApiOutcome<()> {
        let username = match self.require_login(LOGIN_TO_POST_MESSAGE) {
            Ok(username) => username,
            Err(outcome) => return outcome,
        };
        if let Err(errors) = form.validate() {
            return ApiOutcome::invalid(errors);
        }

        let post = post_data(username, form);
        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.post_thread(&post).await.map(|_| ()) },
            "Thread posted successfully",
        )
        .await;
        self.report(&outcome, "Post successful", "Post failed: ");
        outcome
    }

    pub async fn edit_thread(&self, thread_id: i64, form: &PostForm) -> ApiOutcome<()> {
        let username = match self.require_login(LOGIN_TO_POST_MESSAGE) {
            Ok(username) => username,
            Err(outcome) => return outcome,
        };
        if let Err(errors) = form.validate() {
            return ApiOutcome::invalid(errors);
        }

        let post = post_data(username, form);
        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.edit_thread(thread_id, &post).await.map(|_| ()) },
            "Thread edited successfully",
        )
        .await;
        self.report(&outcome, "Thread updated", "Update failed: ");
        outcome
    }

    pub async fn delete_thread(&self, thread_id: i64) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.delete_thread(thread_id).await.map(|_| ()) },
            "Thread deleted successfully",
        )
        .await;
        self.report(&outcome, "Thread deleted", "Deletion failed: ");
        outcome
    }
}

fn post_data(username: String, form: &PostForm) -> PostData {
    PostData {
        username,
        title: form.title.trim().to_string(),
        content: form.content.clone(),
        category: form.category.clone(),
    }
}
