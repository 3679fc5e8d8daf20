//! REST client for the forum backend

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ForumClient, ForumClientBuilder};
