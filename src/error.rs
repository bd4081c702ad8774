// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system:
//! configuration that cannot be resolved, requests Notion rejects, and
//! documents missing structure an extractor requires.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The error object Notion returns alongside a non-200 status.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    code: String,
    message: String,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
        /// Raw response body, kept for diagnosis.
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl AppError {
    /// Builds the error for a response whose status was not 200.
    ///
    /// The body is kept verbatim; when it is a Notion error object its
    /// code and message are lifted out as well.
    pub fn from_failed_response(status: reqwest::StatusCode, url: &str, body: String) -> Self {
        match serde_json::from_str::<NotionErrorBody>(&body) {
            Ok(parsed) => AppError::NotionService {
                code: NotionErrorCode::from_api_response(&parsed.code),
                message: parsed.message,
                status,
                body,
            },
            Err(_) => AppError::NotionService {
                code: NotionErrorCode::from_http_status(status.as_u16()),
                message: format!("HTTP {} from {}: {}", status, url, body),
                status,
                body,
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Failures reading required structure out of a Notion document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Missing required field: {path}")]
    MissingField { path: String },

    #[error("Unknown property: {name}")]
    UnknownProperty { name: String },

    #[error("Malformed field {path}: {reason}")]
    MalformedField { path: String, reason: String },
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn notion_error_body_is_classified() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#;
        let err = AppError::from_failed_response(
            StatusCode::NOT_FOUND,
            "https://api.notion.com/v1/databases/x",
            body.to_string(),
        );

        match err {
            AppError::NotionService {
                code,
                message,
                status,
                body: kept,
            } => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(message, "Could not find database");
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(kept, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn opaque_body_falls_back_to_status() {
        let err = AppError::from_failed_response(
            StatusCode::BAD_GATEWAY,
            "https://api.notion.com/v1/users",
            "upstream down".to_string(),
        );

        assert!(err.to_string().contains("http_502"));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn unknown_codes_are_preserved() {
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
        assert_eq!(NotionErrorCode::RateLimited.to_string(), "rate_limited");
    }

    #[test]
    fn extract_errors_name_the_path() {
        let err = ExtractError::MissingField {
            path: "properties.Name.title[0]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required field: properties.Name.title[0]"
        );
    }
}
