//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Office automation or print subprocess failed
    #[error("Automation failed: {0}")]
    Automation(String),

    /// No print strategy exists for this platform
    #[error("Printing not implemented on platform: {0}")]
    NotImplemented(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
