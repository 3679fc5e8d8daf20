//! User profiles

use super::api_wrapper::{ApiOutcome, into_outcome, with_auth_error_handling};
use super::{ForumApi, LOGIN_TO_CONTINUE_MESSAGE};
use crate::store::Action;
use crate::store::snackbar::Severity;
use forum_core::FieldErrors;
use forum_core::forms::valid_username;
use forum_http::types::{ProfileUpdate, UserProfile};
use tracing::info;

impl ForumApi {
    pub async fn get_profile(&self, username: &str) -> ApiOutcome<UserProfile> {
        into_outcome(
            self.client.get_profile(username).await,
            "Profile fetched successfully",
        )
    }

    /// Update the logged-in user's profile; a new username renames the session
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiOutcome<()> {
        let current = match self.require_login(LOGIN_TO_CONTINUE_MESSAGE) {
            Ok(username) => username,
            Err(outcome) => return outcome,
        };
        if !valid_username(&update.username) {
            let mut errors = FieldErrors::new();
            errors.insert("username", "Please enter a valid username");
            return ApiOutcome::invalid(errors);
        }

        let outcome = with_auth_error_handling(
            &self.store,
            async {
                self.client
                    .update_profile(&current, update)
                    .await
                    .map(|_| ())
            },
            "Profile updated successfully!",
        )
        .await;

        if outcome.success {
            if update.username != current {
                info!("Renamed {current} to {}", update.username);
            }
            self.store.dispatch(Action::RenameUser(update.username.clone()));
            self.store.notify("Profile updated successfully!", Severity::Success);
        } else {
            self.store.notify("Failed to update profile", Severity::Error);
        }
        outcome
    }
}
