// --- File: crates/salonbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across Salonbook crates.
#[derive(Error, Debug)]
pub enum SalonbookError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SalonbookError {
    fn status_code(&self) -> u16 {
        match self {
            SalonbookError::ConfigError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SalonbookError {
    SalonbookError::ConfigError(message.to_string())
}
