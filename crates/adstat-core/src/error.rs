//! Error types for adstat
//!
//! This module defines the error types used throughout the adstat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use adstat_core::error::{AdstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to AdstatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for adstat operations
///
/// None of these are retried anywhere in the pipeline. The runner decides
/// per call site whether an error ends the run.
#[derive(Error, Debug)]
pub enum AdstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure talking to a remote service
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The statistics API answered with a non-success status
    #[error("Upstream error: HTTP {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the statistics API
        status: u16,
        /// Response body, kept verbatim for diagnosis
        body: String,
    },

    /// The spreadsheet service failed (auth, quota, network, bad request)
    #[error("Spreadsheet error: {0}")]
    Sink(String),

    /// Credentials, spreadsheet key or configuration file are invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Convenience type alias for Results in adstat
///
/// # Example
///
/// ```
/// use adstat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AdstatError>;
