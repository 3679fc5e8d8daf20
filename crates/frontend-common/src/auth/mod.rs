//! Session handling

pub mod context;
pub mod token;

pub use context::{Session, SessionSynchronizer};
pub use token::{TokenClaims, TokenError, decode_claims};
