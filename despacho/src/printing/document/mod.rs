//! Document printing through the host office suite
//!
//! Strategies per platform:
//! - Windows: [`ExcelAutomation`], Excel driven over COM from PowerShell
//! - Linux: [`HeadlessOffice`], `soffice --headless -p`
//!
//! Printing is fire-and-forget: a strategy reports success once the print
//! command was issued and the process exited cleanly.

mod excel;
mod headless;

pub use excel::ExcelAutomation;
pub use headless::HeadlessOffice;

use crate::core::AppConfig;
use crate::sheet::{PrintProfile, Sheet, write_sheet};
use despacho_printer::{PrintError, PrintResult};
use shared::Mode;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Page setup applied before printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub landscape: bool,
    /// Fit every column onto one page width
    pub fit_to_width: bool,
    /// Left footer text
    pub footer_left: String,
    /// Right footer text, `&P`/`&N` page codes allowed
    pub footer_right: String,
    /// Header of a column to format as text before printing
    pub text_column: Option<String>,
}

impl From<&PrintProfile> for PageLayout {
    fn from(profile: &PrintProfile) -> Self {
        Self {
            landscape: profile.landscape,
            fit_to_width: true,
            footer_left: profile.footer_title.to_string(),
            footer_right: profile.page_footer().to_string(),
            text_column: profile.text_column.map(str::to_string),
        }
    }
}

/// Capability of a platform document printer
///
/// One printer instance handles one document: `open`, `apply_layout`,
/// `print`, then `close`. Calls block until the office process returns.
pub trait DocumentPrinter {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    fn open(&mut self, path: &Path) -> PrintResult<()>;

    fn apply_layout(&mut self, layout: &PageLayout) -> PrintResult<()>;

    fn print(&mut self) -> PrintResult<()>;

    /// Release the document without saving changes
    fn close(&mut self) -> PrintResult<()>;
}

/// Pick the strategy for an OS name as reported by `std::env::consts::OS`
pub fn select_document_printer(
    os: &str,
    config: &AppConfig,
) -> PrintResult<Box<dyn DocumentPrinter + Send>> {
    match os {
        "windows" => Ok(Box::new(ExcelAutomation::new(config.printer_name.clone()))),
        "linux" => Ok(Box::new(HeadlessOffice::new(
            config.office_bin.clone(),
            config.printer_name.clone(),
        ))),
        other => Err(PrintError::NotImplemented(other.to_string())),
    }
}

/// Run the full open/layout/print/close cycle
///
/// `close` runs even when a previous step failed; the first error wins.
pub fn run_print_cycle(
    printer: &mut dyn DocumentPrinter,
    path: &Path,
    layout: &PageLayout,
) -> PrintResult<()> {
    printer.open(path)?;
    let result = printer
        .apply_layout(layout)
        .and_then(|_| printer.print());
    let closed = printer.close();
    result.and(closed)
}

/// Errors from the document print entry points
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Print(#[from] PrintError),

    #[error(transparent)]
    Sheet(#[from] crate::sheet::SheetError),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Print an existing spreadsheet with the mode's layout
#[instrument(skip(config, path), fields(mode = %mode, path = %path.display()))]
pub async fn print_file(config: &AppConfig, mode: Mode, path: &Path) -> DocumentResult<()> {
    if !path.is_file() {
        return Err(crate::sheet::SheetError::NotFound(path.to_path_buf()).into());
    }

    let mut printer = select_document_printer(std::env::consts::OS, config)?;
    let layout = PageLayout::from(&PrintProfile::for_mode(mode));
    let path: PathBuf = path.to_path_buf();

    info!(strategy = printer.name(), "Sending document to printer");
    tokio::task::spawn_blocking(move || run_print_cycle(printer.as_mut(), &path, &layout))
        .await
        .map_err(|e| PrintError::Automation(format!("Print task failed: {}", e)))??;

    info!("Document print issued");
    Ok(())
}

/// Export records to a formatted temporary workbook and print it
///
/// The temporary file is removed once the print command returns.
#[instrument(skip(config, sheet), fields(mode = %mode, rows = sheet.len()))]
pub async fn print_records(config: &AppConfig, mode: Mode, sheet: &Sheet) -> DocumentResult<()> {
    let profile = PrintProfile::for_mode(mode);
    let temp = tempfile::Builder::new()
        .prefix("despacho-")
        .suffix(".xlsx")
        .tempfile()
        .map_err(PrintError::Io)?;

    write_sheet(sheet, &profile, temp.path())?;
    print_file(config, mode, temp.path()).await
}
