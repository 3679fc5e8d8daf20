//! Request and response bodies exchanged with the forum backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A thread as listed on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or editing a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostData {
    pub username: String,
    pub title: String,
    pub content: String,
    pub category: String,
}

/// Query string for `GET /threads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only threads by this author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl Default for ThreadQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            category: None,
            search: None,
            username: None,
            sort: None,
        }
    }
}

impl ThreadQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }
}

/// The backend serializes an empty list as `null`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadsResponse {
    #[serde(default)]
    pub threads: Option<Vec<Thread>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadResponse {
    pub thread: Thread,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub thread_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentData {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreatedResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub comment: Comment,
}

/// Up or down; travels as `1` or `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for i8 {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl TryFrom<i8> for VoteDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(format!("vote must be 1 or -1, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteData {
    pub vote: VoteDirection,
}

/// Net score of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub votes: i64,
}

/// A user's current vote on a thread: `1`, `-1`, or `0` for none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteState {
    #[serde(default)]
    pub vote: i8,
}

impl VoteState {
    pub fn direction(&self) -> Option<VoteDirection> {
        VoteDirection::try_from(self.vote).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub joined: String,
}

/// Editable profile fields; `username` renames the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub bio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_direction_travels_as_integer() {
        let body = serde_json::to_value(VoteData {
            vote: VoteDirection::Down,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"vote": -1}));

        assert!(serde_json::from_str::<VoteData>(r#"{"vote":0}"#).is_err());
    }

    #[test]
    fn vote_state_zero_means_no_vote() {
        let state: VoteState = serde_json::from_str(r#"{"vote":0}"#).unwrap();
        assert_eq!(state.direction(), None);
        let state: VoteState = serde_json::from_str(r#"{"vote":1}"#).unwrap();
        assert_eq!(state.direction(), Some(VoteDirection::Up));
    }

    #[test]
    fn null_thread_list_decodes() {
        let resp: ThreadsResponse = serde_json::from_str(r#"{"threads":null}"#).unwrap();
        assert!(resp.threads.is_none());
    }

    #[test]
    fn thread_query_skips_unset_filters() {
        let query = ThreadQuery {
            category: Some("Frogs".into()),
            ..ThreadQuery::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"page": 1, "limit": 10, "category": "Frogs"})
        );
    }

    #[test]
    fn thread_timestamps_accept_offsets() {
        let thread: Thread = serde_json::from_str(
            r#"{"id":3,"username":"frog","title":"t","content":"c","category":"General","created_at":"2024-12-01T10:00:00+08:00"}"#,
        )
        .unwrap();
        assert_eq!(thread.created_at.to_rfc3339(), "2024-12-01T02:00:00+00:00");
    }
}
