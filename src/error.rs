// src/error.rs

//! Unified error handling for the watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Markdown source could not be read
    #[error("Cannot read source {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Mail credentials are not configured
    #[error("Missing mail credentials: {0} is not set")]
    MissingCredentials(&'static str),

    /// Building or sending the email failed
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a source read error.
    pub fn unreadable_source(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Source {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a mail error from any displayable cause.
    pub fn mail(message: impl fmt::Display) -> Self {
        Self::Mail(message.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::mail(err)
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(err: lettre::error::Error) -> Self {
        Self::mail(err)
    }
}

impl From<lettre::address::AddressError> for AppError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::mail(format!("invalid address: {err}"))
    }
}

/// Why a single table row could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Row has fewer pipe-delimited cells than a listing needs
    #[error("expected at least {required} cells, found {found}")]
    TooFewCells { found: usize, required: usize },

    /// Markdown header delimiter such as `|---|:---:|`
    #[error("table delimiter row")]
    DelimiterRow,
}
