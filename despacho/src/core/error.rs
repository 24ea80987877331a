//! Mapping of module errors onto [`AppError`] codes
//!
//! Each CLI action turns its failure into one `AppError`, which in turn
//! becomes the single [`shared::Notice`] shown to the operator.

use super::config::ConfigError;
use crate::printing::{DocumentError, LabelError, LabelPrintError};
use crate::sheet::SheetError;
use despacho_printer::PrintError;
use shared::{AppError, ErrorCode};

impl From<SheetError> for AppError {
    fn from(e: SheetError) -> Self {
        let message = e.to_string();
        match e {
            SheetError::NotFound(path) => AppError::file_not_found(path.display().to_string()),
            SheetError::Unsupported(ext) => {
                AppError::with_message(ErrorCode::UnsupportedFileFormat, message)
                    .with_detail("extension", ext)
            }
            SheetError::Io { path, .. } => {
                AppError::with_message(ErrorCode::SheetReadFailed, message)
                    .with_detail("path", path.display().to_string())
            }
            SheetError::NoHeaderRow => AppError::with_message(ErrorCode::SheetEmpty, message),
            SheetError::OpenWorkbook(_) | SheetError::NoWorksheet | SheetError::Csv(_) => {
                AppError::with_message(ErrorCode::SheetReadFailed, message)
            }
            SheetError::Write(_) => AppError::with_message(ErrorCode::SheetWriteFailed, message),
        }
    }
}

impl From<LabelError> for AppError {
    fn from(e: LabelError) -> Self {
        match e {
            LabelError::MissingField(field) => AppError::missing_field(field),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        let message = e.to_string();
        match e {
            ConfigError::Read { path, .. } => {
                AppError::with_message(ErrorCode::ConfigReadFailed, message)
                    .with_detail("path", path.display().to_string())
            }
            ConfigError::Parse { path, .. } => {
                AppError::with_message(ErrorCode::ConfigInvalid, message)
                    .with_detail("path", path.display().to_string())
            }
        }
    }
}

impl From<LabelPrintError> for AppError {
    fn from(e: LabelPrintError) -> Self {
        match e {
            LabelPrintError::Label(e) => e.into(),
            LabelPrintError::Print(e) => print_error(e),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Print(e) => print_error(e),
            DocumentError::Sheet(e) => e.into(),
        }
    }
}

/// Map a printer-level failure
pub fn print_error(e: PrintError) -> AppError {
    let message = e.to_string();
    let code = match &e {
        PrintError::Connection(_) | PrintError::Io(_) => ErrorCode::NetworkError,
        PrintError::Timeout(_) => ErrorCode::TimeoutError,
        PrintError::InvalidConfig(_) => ErrorCode::PrinterConfigInvalid,
        PrintError::Automation(_) => ErrorCode::AutomationFailed,
        PrintError::NotImplemented(os) => {
            return AppError::with_message(ErrorCode::PlatformNotSupported, message)
                .with_detail("os", os.clone());
        }
    };
    AppError::with_message(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppConfig;
    use std::path::PathBuf;

    #[test]
    fn test_sheet_errors() {
        let err: AppError = SheetError::NotFound(PathBuf::from("/tmp/x.csv")).into();
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert_eq!(err.details.unwrap()["path"], "/tmp/x.csv");

        let err: AppError = SheetError::Unsupported("pdf".into()).into();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
    }

    #[test]
    fn test_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("despacho.json");

        let err: AppError = AppConfig::from_file(&path).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ConfigReadFailed);

        std::fs::write(&path, "{ zebra_ip: ").unwrap();
        let err: AppError = AppConfig::from_file(&path).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
        assert_eq!(err.code.category().name(), "config");
    }

    #[test]
    fn test_label_missing_field() {
        let err: AppError = LabelPrintError::Label(LabelError::MissingField("guia".into())).into();
        assert_eq!(err.code, ErrorCode::LabelFieldMissing);
        assert_eq!(err.message, "Missing field: guia");
    }

    #[test]
    fn test_print_errors() {
        assert_eq!(
            print_error(PrintError::Timeout("Connection timeout: 10.0.0.1:9100".into())).code,
            ErrorCode::TimeoutError
        );
        let err = print_error(PrintError::NotImplemented("macos".into()));
        assert_eq!(err.code, ErrorCode::PlatformNotSupported);
        assert_eq!(err.details.unwrap()["os"], "macos");

        let err: AppError =
            DocumentError::Print(PrintError::Automation("COM error 0x800A03EC".into())).into();
        assert_eq!(err.code, ErrorCode::AutomationFailed);
        assert!(err.message.contains("0x800A03EC"));
    }
}
