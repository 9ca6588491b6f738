/*!
 * Error types for the ruslate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with the translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

/// Errors that can occur while translating a single span of text
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider returned an empty translation for non-empty input
    #[error("Provider returned an empty translation")]
    EmptyTranslation,
}

/// Errors that can occur while decoding a candidate file
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file could not be read at all
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// None of the candidate encodings decoded the file without error
    #[error("No candidate encoding decoded {path:?}")]
    NoEncodingMatched {
        /// Path of the undecodable file
        path: PathBuf,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error decoding a candidate file
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error from the translation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error translating a span
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
