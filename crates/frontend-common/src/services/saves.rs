//! Saved threads

use super::api_wrapper::{ApiOutcome, into_outcome, with_auth_error_handling};
use super::{ForumApi, LOGIN_TO_CONTINUE_MESSAGE};

impl ForumApi {
    pub async fn save_thread(&self, thread_id: i64) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.save_thread(thread_id).await.map(|_| ()) },
            "Thread saved successfully",
        )
        .await;
        self.report(&outcome, "Thread saved", "Save failed: ");
        outcome
    }

    pub async fn unsave_thread(&self, thread_id: i64) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.unsave_thread(thread_id).await.map(|_| ()) },
            "Thread unsaved successfully",
        )
        .await;
        self.report(&outcome, "Thread removed from saved", "Unsave failed: ");
        outcome
    }

    /// Whether the logged-in user saved a thread; always `false` when logged out
    pub async fn is_saved(&self, thread_id: i64) -> ApiOutcome<bool> {
        if self.store.session().user().is_none() {
            return ApiOutcome::ok("Not logged in", false);
        }

        let result = self.client.is_saved(thread_id).await.map(|state| state.saved);
        into_outcome(result, "Saved state fetched successfully")
    }
}
