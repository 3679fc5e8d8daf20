//! Configuration validation support

use config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trait for validating configuration values
pub trait ValidateConfig: Serialize + for<'de> Deserialize<'de> {
    /// Validate the configuration
    ///
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Common validation helpers
pub mod validators {
    use config::ConfigError;

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::Message(format!("{field}: cannot be empty")));
        }
        Ok(())
    }

    /// Validate URL format, restricted to http and https
    pub fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
        let url = url::Url::parse(value)
            .map_err(|e| ConfigError::Message(format!("{field}: invalid URL - {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "{field}: unsupported scheme '{other}'"
            ))),
        }
    }

    /// Validate that a value is within range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<(), ConfigError> {
        if value < min || value > max {
            return Err(ConfigError::Message(format!(
                "{field}: must be between {min} and {max}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn rejects_blank_values() {
        assert!(validate_not_empty("   ", "base_url").is_err());
        assert!(validate_not_empty("x", "base_url").is_ok());
    }

    #[test]
    fn only_http_urls_are_accepted() {
        assert!(validate_http_url("http://localhost:8080", "base_url").is_ok());
        assert!(validate_http_url("https://forum.example", "base_url").is_ok());
        assert!(validate_http_url("ftp://forum.example", "base_url").is_err());
        assert!(validate_http_url("not a url", "base_url").is_err());
    }

    #[test]
    fn range_is_inclusive() {
        assert!(validate_range(1, 1, 100, "page_size").is_ok());
        assert!(validate_range(100, 1, 100, "page_size").is_ok());
        assert!(validate_range(0, 1, 100, "page_size").is_err());
    }
}
