//! Thread voting

use super::api_wrapper::{ApiOutcome, into_outcome, with_auth_error_handling};
use super::{ForumApi, LOGIN_TO_CONTINUE_MESSAGE};
use forum_http::types::{VoteCount, VoteDirection, VoteState};

impl ForumApi {
    /// Vote on a thread, replacing any earlier vote by the same user
    pub async fn cast_vote(&self, thread_id: i64, vote: VoteDirection) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.cast_vote(thread_id, vote).await.map(|_| ()) },
            "Vote casted successfully",
        )
        .await;
        self.report(&outcome, "Vote recorded", "Vote failed: ");
        outcome
    }

    pub async fn retract_vote(&self, thread_id: i64) -> ApiOutcome<()> {
        if let Err(outcome) = self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            return outcome;
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async { self.client.retract_vote(thread_id).await.map(|_| ()) },
            "Vote deleted successfully",
        )
        .await;
        self.report(&outcome, "Vote removed", "Vote failed: ");
        outcome
    }

    pub async fn count_votes(&self, thread_id: i64) -> ApiOutcome<VoteCount> {
        into_outcome(
            self.client.count_votes(thread_id).await,
            "Votes fetched successfully",
        )
    }

    pub async fn vote_state(&self, username: &str, thread_id: i64) -> ApiOutcome<VoteState> {
        into_outcome(
            self.client.vote_state(username, thread_id).await,
            "Vote state fetched successfully",
        )
    }
}
