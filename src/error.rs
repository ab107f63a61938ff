//! Error types and handling for the vehicle catalog bot

use serde::Serialize;
use std::fmt;

/// Application error types for the adapter layer (webhook, delivery, AI
/// extraction). The search core itself never fails: an empty result set is a
/// normal outcome, not an error.
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    DeliveryFailed(String),
    Timeout(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::DeliveryFailed(msg) => write!(f, "Message delivery failed: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the error code for webhook JSON responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::DeliveryFailed(_) => "delivery_failed",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            AppError::DeliveryFailed(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Validation for user-facing query text
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    if query.len() > 500 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Normalize inbound message text using Unicode NFKC
pub fn normalize_text(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfkc().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).error_code(), "invalid_input");
        assert_eq!(AppError::Timeout("x".into()).error_code(), "timeout");
        assert_eq!(AppError::DeliveryFailed("x".into()).error_code(), "delivery_failed");
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("Toyota Hilux").is_ok());
        assert!(validate_query("").is_err());
        assert!(validate_query("   ").is_err());
        assert!(validate_query(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hilux  "), "Hilux");
        // NFKC folds compatibility characters
        assert_eq!(normalize_text("ﬁpe"), "fipe");
    }
}
