//! Unified error codes for despacho
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Configuration errors
//! - 2xxx: File and spreadsheet errors
//! - 3xxx: Label errors
//! - 9xxx: System and printing errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that a front end can
/// match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 1xxx: Config ====================
    /// Configuration file could not be read
    ConfigReadFailed = 1001,
    /// Configuration file is malformed
    ConfigInvalid = 1002,

    // ==================== 2xxx: Files ====================
    /// Folder is missing or empty
    FolderEmpty = 2001,
    /// No file matches the requested mode
    NoMatchingFile = 2002,
    /// Input file does not exist
    FileNotFound = 2003,
    /// Spreadsheet could not be read
    SheetReadFailed = 2004,
    /// Spreadsheet could not be written
    SheetWriteFailed = 2005,
    /// File extension not supported
    UnsupportedFileFormat = 2006,
    /// Spreadsheet has no data rows
    SheetEmpty = 2007,

    // ==================== 3xxx: Labels ====================
    /// A field required by the label template is missing
    LabelFieldMissing = 3001,
    /// Requested row is outside the sheet
    LabelRowOutOfRange = 3002,

    // ==================== 9xxx: System ====================
    /// Network error
    NetworkError = 9003,
    /// Timeout
    TimeoutError = 9004,

    // ==================== 92xx: Printing ====================
    /// Printer configuration invalid
    PrinterConfigInvalid = 9203,

    // ==================== 93xx: Platform ====================
    /// Printing is not implemented on this platform
    PlatformNotSupported = 9301,
    /// Office automation failed
    AutomationFailed = 9302,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",

            // Config
            ErrorCode::ConfigReadFailed => "Configuration file could not be read",
            ErrorCode::ConfigInvalid => "Configuration file is malformed",

            // Files
            ErrorCode::FolderEmpty => "Folder is missing or empty",
            ErrorCode::NoMatchingFile => "No file matches the selected mode",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::SheetReadFailed => "Spreadsheet could not be read",
            ErrorCode::SheetWriteFailed => "Spreadsheet could not be written",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::SheetEmpty => "Spreadsheet has no data rows",

            // Labels
            ErrorCode::LabelFieldMissing => "Label field is missing",
            ErrorCode::LabelRowOutOfRange => "Label row is out of range",

            // System
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::PrinterConfigInvalid => "Printer configuration is invalid",
            ErrorCode::PlatformNotSupported => "Printing is not implemented on this platform",
            ErrorCode::AutomationFailed => "Office automation failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),

            // Config
            1001 => Ok(ErrorCode::ConfigReadFailed),
            1002 => Ok(ErrorCode::ConfigInvalid),

            // Files
            2001 => Ok(ErrorCode::FolderEmpty),
            2002 => Ok(ErrorCode::NoMatchingFile),
            2003 => Ok(ErrorCode::FileNotFound),
            2004 => Ok(ErrorCode::SheetReadFailed),
            2005 => Ok(ErrorCode::SheetWriteFailed),
            2006 => Ok(ErrorCode::UnsupportedFileFormat),
            2007 => Ok(ErrorCode::SheetEmpty),

            // Labels
            3001 => Ok(ErrorCode::LabelFieldMissing),
            3002 => Ok(ErrorCode::LabelRowOutOfRange),

            // System
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9203 => Ok(ErrorCode::PrinterConfigInvalid),
            9301 => Ok(ErrorCode::PlatformNotSupported),
            9302 => Ok(ErrorCode::AutomationFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
