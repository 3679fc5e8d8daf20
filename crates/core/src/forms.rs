//! Client-side form validation
//!
//! Every check here runs before a request is built, so a form that fails
//! validation never reaches the network. Failures are reported per field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest accepted thread title, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Longest accepted thread body, in characters
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,}$").expect("username pattern is valid"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));
static LOWERCASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]").expect("lowercase pattern is valid"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("digit pattern is valid"));

/// Field name to message, ordered for stable display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Letters, digits and underscores, at least three of them
pub fn valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// At least eight characters with a lowercase letter and a digit
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && LOWERCASE_RE.is_match(password)
        && DIGIT_RE.is_match(password)
}

/// Something, an `@`, something, a dot, something
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Credentials typed into the login dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !valid_username(&self.username) {
            errors.insert("username", "Please enter a valid username");
        }
        if !valid_password(&self.password) {
            errors.insert("password", "Please enter a valid password");
        }
        errors.into_result()
    }
}

/// Fields of the signup page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !valid_username(&self.username) {
            errors.insert(
                "username",
                "Username must be at least 3 characters long and contain only letters, numbers, and underscores.",
            );
        }
        if !valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email address.");
        }
        if !valid_password(&self.password) {
            errors.insert(
                "password",
                "Password must be at least 8 characters long and contain at least one number and one letter.",
            );
        }
        errors.into_result()
    }
}

/// Title, body and category of a new or edited thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        } else if self.title.chars().count() > MAX_TITLE_CHARS {
            errors.insert(
                "title",
                format!("Title must be less than {MAX_TITLE_CHARS} characters"),
            );
        }

        if self.content.trim().is_empty() {
            errors.insert("content", "Content is required");
        } else if self.content.chars().count() > MAX_CONTENT_CHARS {
            errors.insert(
                "content",
                format!("Content must be less than {MAX_CONTENT_CHARS} characters"),
            );
        }

        if self.category.is_empty() {
            errors.insert("category", "Category is required");
        }

        errors.into_result()
    }
}

/// Reject comments that are only whitespace
pub fn validate_comment(content: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if content.trim().is_empty() {
        errors.insert("content", "Comment cannot be empty");
    }
    errors.into_result()
}
