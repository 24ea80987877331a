//! Shared types for despacho
//!
//! Domain models and the unified error system used by the printer library
//! and the application crate.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, Notice};
pub use models::{FileCandidate, MissingField, Mode, ParseModeError, PrinterTarget, Record};
pub use serde::{Deserialize, Serialize};
