// src/error.rs

//! Unified error handling for the client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The detail page did not have the structure of a live post
    #[error("Missing or invalid post: {url}")]
    MissingPost {
        url: String,
        #[source]
        source: ParseError,
    },

    /// A field was read from a reference that has not been loaded
    #[error("Cannot obtain value \"{field}\" from the unloaded resource: {url}")]
    Unloaded { url: String, field: &'static str },

    /// The submission page carried a type label with no known kind
    #[error("Unsupported submission type '{label}' at {url}")]
    UnsupportedType { url: String, label: String },

    /// A method was called with an argument it cannot serve
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A reply referenced a parent that was not parsed before it
    #[error("Reply {id} references unknown parent {parent}")]
    OrphanReply { id: u64, parent: u64 },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a missing-post error wrapping the structural cause.
    pub fn missing_post(url: impl Into<String>, source: ParseError) -> Self {
        Self::MissingPost {
            url: url.into(),
            source,
        }
    }

    /// Create an unloaded-resource error for `field` of `url`.
    pub fn unloaded(url: impl Into<String>, field: &'static str) -> Self {
        Self::Unloaded {
            url: url.into(),
            field,
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this error reports a removed or relocated post.
    pub fn is_missing_post(&self) -> bool {
        matches!(self, Self::MissingPost { .. })
    }
}

/// Structural failure while reading fields out of a fetched page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no element matches '{selector}'")]
    MissingElement { selector: String },

    #[error("element '{selector}' has no '{attr}' attribute")]
    MissingAttribute { selector: String, attr: String },

    #[error("field {field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid date/time '{value}'")]
    InvalidDate { value: String },
}

impl ParseError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    pub fn missing_attr(selector: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::MissingAttribute {
            selector: selector.into(),
            attr: attr.into(),
        }
    }
}
