// src/error.rs

//! Unified error handling for the chef application.

use std::fmt;

use thiserror::Error;

/// Result type alias for chef operations.
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

    /// Zip bundling failed
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange with the content API failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A listing page request returned a non-success status
    #[error("Request to {url} failed with status {status}")]
    Fetch { url: String, status: u16 },

    /// Pagination completed without collecting a single item
    #[error("Listing at {endpoint} returned zero items; API unreachable or misconfigured")]
    EmptyListing { endpoint: String },

    /// A category or grade value is missing from its lookup table
    #[error("Unknown {kind} '{key}'")]
    Lookup { kind: &'static str, key: String },

    /// Package rendering failed for one text item
    #[error("Failed to render package for item {item_id}: {message}")]
    Render { item_id: u64, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a lookup-table error.
    pub fn lookup(kind: &'static str, key: impl Into<String>) -> Self {
        Self::Lookup {
            kind,
            key: key.into(),
        }
    }

    /// Create a render error with context.
    pub fn render(item_id: u64, message: impl fmt::Display) -> Self {
        Self::Render {
            item_id,
            message: message.to_string(),
        }
    }
}
