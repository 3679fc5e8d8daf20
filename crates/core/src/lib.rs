//! Shared building blocks for the forum client crates

pub mod config;
pub mod error;
pub mod forms;
pub mod storage;
pub mod validation;

pub use config::{ClientConfig, default_data_dir};
pub use error::{CoreError, CoreResult};
pub use forms::{FieldErrors, LoginForm, PostForm, SignupForm};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use validation::{ValidateConfig, validators};
