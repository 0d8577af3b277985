//! Error types for hubpager
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! None of these are retried: any error aborts the whole page chain and
//! whatever pages were already fetched are dropped.

use thiserror::Error;

/// The main error type for hubpager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Malformed Link header entry: '{entry}'")]
    LinkHeader { entry: String },

    #[error("Pagination exceeded the limit of {max_pages} pages")]
    PageLimitExceeded { max_pages: u32 },

    #[error("Request cancelled after {pages_fetched} page(s)")]
    Cancelled { pages_fetched: u32 },

    // ============================================================================
    // Invocation Errors
    // ============================================================================
    #[error("Invalid invocation: {message}")]
    InvalidInvocation { message: String },

    #[error(
        "No route for '{operation}' takes {arg_count} argument(s); available templates: {templates}"
    )]
    NoMatchingRoute {
        operation: String,
        arg_count: usize,
        templates: String,
    },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed link header error
    pub fn link_header(entry: impl Into<String>) -> Self {
        Self::LinkHeader {
            entry: entry.into(),
        }
    }

    /// Create an invalid invocation error
    pub fn invalid_invocation(message: impl Into<String>) -> Self {
        Self::InvalidInvocation {
            message: message.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error was raised before any request went out
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInvocation { .. }
                | Error::NoMatchingRoute { .. }
                | Error::UnknownOperation { .. }
        )
    }
}

/// Result type alias for hubpager
pub type Result<T> = std::result::Result<T, Error>;
