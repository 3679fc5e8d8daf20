pub mod auth;
pub mod feed;
pub mod services;
pub mod store;

pub use auth::{Session, SessionSynchronizer};
pub use feed::ThreadFeed;
pub use services::{ApiOutcome, ForumApi};
pub use store::{Action, AppStore, UiState};
