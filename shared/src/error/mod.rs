//! Unified error system for despacho
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`AppError`]: Error with code, message and details
//! - [`Notice`]: The one notification a user-facing action resolves to
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, Notice};
//!
//! let err = AppError::with_message(ErrorCode::NoMatchingFile, "No urbano file in Downloads")
//!     .with_detail("mode", "urbano");
//!
//! let notice = Notice::<()>::error(&err);
//! assert_eq!(notice.code, 2002);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, Notice};
