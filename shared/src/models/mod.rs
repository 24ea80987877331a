//! Data models
//!
//! Plain values passed between the autoloader, the sheet reader and the
//! printing layer. None of them are persisted.

pub mod file_candidate;
pub mod mode;
pub mod printer_target;
pub mod record;

// Re-exports
pub use file_candidate::*;
pub use mode::*;
pub use printer_target::*;
pub use record::*;
