//! Session state and its synchronization with the stored bearer token

use super::token::decode_claims;
use crate::store::{Action, AppStore};
use forum_core::TokenStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

/// Who the client believes is logged in, and until when
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    pub is_logged_in: bool,
    /// Unix timestamp
    pub token_expiry: Option<i64>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn logged_in(username: impl Into<String>, token_expiry: i64) -> Self {
        Self {
            username: Some(username.into()),
            is_logged_in: true,
            token_expiry: Some(token_expiry),
        }
    }

    /// Logged in with a username and a token that outlives `now_secs`
    pub fn is_valid_at(&self, now_secs: i64) -> bool {
        self.is_logged_in
            && self.username.as_deref().is_some_and(|u| !u.is_empty())
            && self.token_expiry.is_some_and(|exp| exp > now_secs)
    }

    /// Username when logged in
    pub fn user(&self) -> Option<&str> {
        if self.is_logged_in {
            self.username.as_deref()
        } else {
            None
        }
    }
}

/// Keeps the session in the store consistent with the stored token
///
/// Holds at most one pending expiry task; scheduling a new one or logging
/// out aborts the previous task.
pub struct SessionSynchronizer {
    tokens: Arc<dyn TokenStore>,
    store: AppStore,
    expiry_task: Mutex<Option<AbortHandle>>,
}

impl std::fmt::Debug for SessionSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSynchronizer")
            .field("expiry_pending", &self.has_pending_expiry())
            .finish()
    }
}

impl SessionSynchronizer {
    pub fn new(tokens: Arc<dyn TokenStore>, store: AppStore) -> Self {
        Self {
            tokens,
            store,
            expiry_task: Mutex::new(None),
        }
    }

    /// Re-derive the session from the stored token
    ///
    /// A missing, undecodable or expired token logs the session out; it is
    /// never an error.
    pub fn sync(&self) -> Session {
        let token = match self.tokens.get() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored token, session is logged out");
                return self.clear_session();
            }
            Err(e) => {
                warn!("Failed to read stored token: {e}");
                return self.clear_session();
            }
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Stored token could not be decoded: {e}");
                return self.clear_session();
            }
        };

        if claims.is_expired_at(now_millis()) {
            info!("Stored token for {} has expired", claims.sub);
            return self.clear_session();
        }

        self.store.dispatch(Action::SetSession {
            username: claims.sub.clone(),
            token_expiry: claims.exp,
        });
        info!("Session synced for {}", claims.sub);
        self.schedule_expiry(claims.exp);
        self.store.session()
    }

    /// Arrange for the token and session to be cleared at `expiry_epoch_secs`
    ///
    /// Returns whether a task was scheduled. A non-positive delay is logged
    /// and left alone, as is a call made outside a tokio runtime.
    pub fn schedule_expiry(&self, expiry_epoch_secs: i64) -> bool {
        let delay_ms = expiry_epoch_secs
            .saturating_mul(1000)
            .saturating_sub(now_millis());
        debug!("Scheduling session expiry in {delay_ms}ms");

        if delay_ms <= 0 {
            error!("Token expiration time is invalid or in the past: {expiry_epoch_secs}");
            return false;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, session expiry not scheduled");
            return false;
        };

        let tokens = Arc::clone(&self.tokens);
        let store = self.store.clone();
        let delay = Duration::from_millis(delay_ms.unsigned_abs());
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tokens.clear() {
                warn!("Failed to remove expired token: {e}");
            }
            store.dispatch(Action::ClearSession);
            info!("Token expired, session cleared");
        });

        self.replace_expiry_task(Some(task.abort_handle()));
        true
    }

    /// Drop the stored token and session and cancel any pending expiry
    pub fn logout(&self) -> Session {
        if let Err(e) = self.tokens.clear() {
            warn!("Failed to remove stored token: {e}");
        }
        self.replace_expiry_task(None);
        self.store.dispatch(Action::ClearSession);
        info!("Logged out");
        self.store.session()
    }

    /// Whether an expiry task is waiting to fire
    pub fn has_pending_expiry(&self) -> bool {
        self.expiry_task
            .lock()
            .map(|task| task.as_ref().is_some_and(|t| !t.is_finished()))
            .unwrap_or(false)
    }

    fn clear_session(&self) -> Session {
        self.replace_expiry_task(None);
        self.store.dispatch(Action::ClearSession);
        self.store.session()
    }

    fn replace_expiry_task(&self, next: Option<AbortHandle>) {
        match self.expiry_task.lock() {
            Ok(mut slot) => {
                if let Some(previous) = std::mem::replace(&mut *slot, next) {
                    previous.abort();
                }
            }
            Err(_) => warn!("Expiry task lock poisoned"),
        }
    }
}

impl Drop for SessionSynchronizer {
    fn drop(&mut self) {
        self.replace_expiry_task(None);
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::encode_unsigned;
    use forum_core::{CoreError, CoreResult, MemoryTokenStore};
    use mockall::mock;

    mock! {
        pub Tokens {}

        impl TokenStore for Tokens {
            fn get(&self) -> CoreResult<Option<String>>;
            fn set(&self, token: &str) -> CoreResult<()>;
            fn clear(&self) -> CoreResult<()>;
        }
    }

    fn now_secs() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn synchronizer_with(token: Option<String>) -> (SessionSynchronizer, Arc<MemoryTokenStore>, AppStore) {
        let tokens = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        let store = AppStore::default();
        let sync = SessionSynchronizer::new(tokens.clone(), store.clone());
        (sync, tokens, store)
    }

    #[tokio::test]
    async fn valid_token_logs_in_with_subject() {
        let exp = now_secs() + 3600;
        let (sync, _, store) = synchronizer_with(Some(encode_unsigned("frog", exp)));

        let session = sync.sync();
        assert_eq!(session, Session::logged_in("frog", exp));
        assert_eq!(store.session(), session);
        assert!(session.is_valid_at(now_secs()));
        assert!(sync.has_pending_expiry());
    }

    #[tokio::test]
    async fn missing_malformed_or_expired_tokens_log_out() {
        let expired = encode_unsigned("frog", now_secs() - 10);
        for token in [None, Some("garbage".to_string()), Some("a.b.c".to_string()), Some(expired)] {
            let (sync, _, store) = synchronizer_with(token);
            store.dispatch(Action::SetSession {
                username: "stale".into(),
                token_expiry: now_secs() + 60,
            });

            assert_eq!(sync.sync(), Session::logged_out());
            assert_eq!(store.session(), Session::logged_out());
            assert!(!sync.has_pending_expiry());
        }
    }

    #[tokio::test]
    async fn expired_token_is_left_in_storage() {
        let expired = encode_unsigned("frog", now_secs() - 10);
        let (sync, tokens, _) = synchronizer_with(Some(expired.clone()));
        sync.sync();
        assert_eq!(tokens.get().unwrap(), Some(expired));
    }

    #[tokio::test]
    async fn storage_failure_fails_open_to_logged_out() {
        let mut tokens = MockTokens::new();
        tokens
            .expect_get()
            .returning(|| Err(CoreError::storage_error("unavailable")));
        tokens.expect_clear().never();

        let store = AppStore::default();
        let sync = SessionSynchronizer::new(Arc::new(tokens), store.clone());
        assert_eq!(sync.sync(), Session::logged_out());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_clears_token_and_session() {
        let exp = now_secs() + 30;
        let (sync, tokens, store) = synchronizer_with(Some(encode_unsigned("frog", exp)));
        assert!(sync.sync().is_logged_in);

        tokio::time::sleep(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;

        assert_eq!(store.session(), Session::logged_out());
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn session_survives_until_expiry() {
        let exp = now_secs() + 30;
        let (sync, tokens, store) = synchronizer_with(Some(encode_unsigned("frog", exp)));
        sync.sync();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(store.session().is_logged_in);
        assert!(tokens.get().unwrap().is_some());
    }

    #[tokio::test]
    async fn past_expiry_is_not_scheduled() {
        let (sync, tokens, store) = synchronizer_with(Some("kept".into()));
        store.dispatch(Action::SetSession {
            username: "frog".into(),
            token_expiry: 1,
        });

        assert!(!sync.schedule_expiry(now_secs() - 1));
        assert!(!sync.has_pending_expiry());
        // Nothing is proactively cleared on this path
        assert_eq!(tokens.get().unwrap().as_deref(), Some("kept"));
        assert!(store.session().is_logged_in);
    }

    #[tokio::test]
    async fn extreme_past_expiry_is_not_scheduled() {
        let (sync, _, _) = synchronizer_with(Some("kept".into()));
        assert!(!sync.schedule_expiry(i64::MIN));
        assert!(!sync.schedule_expiry(i64::MIN / 1000));
        assert!(!sync.has_pending_expiry());
    }

    #[test]
    fn scheduling_without_runtime_is_skipped() {
        let (sync, _, _) = synchronizer_with(None);
        assert!(!sync.schedule_expiry(now_secs() + 60));
    }

    #[tokio::test(start_paused = true)]
    async fn logout_cancels_pending_expiry() {
        let exp = now_secs() + 30;
        let (sync, tokens, store) = synchronizer_with(Some(encode_unsigned("frog", exp)));
        sync.sync();
        assert!(sync.has_pending_expiry());

        assert_eq!(sync.logout(), Session::logged_out());
        assert!(!sync.has_pending_expiry());
        assert_eq!(tokens.get().unwrap(), None);

        // A later login must not be cut short by the old timer
        let next_exp = now_secs() + 3600;
        tokens.set(&encode_unsigned("toad", next_exp)).unwrap();
        sync.sync();
        tokio::time::sleep(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;
        assert_eq!(store.session().user(), Some("toad"));
    }

    #[test]
    fn session_validity_requires_every_part() {
        assert!(Session::logged_in("frog", 100).is_valid_at(99));
        assert!(!Session::logged_in("frog", 100).is_valid_at(100));
        assert!(!Session::logged_in("", 100).is_valid_at(0));
        assert!(!Session::logged_out().is_valid_at(0));
        assert_eq!(Session::logged_out().user(), None);
    }
}
