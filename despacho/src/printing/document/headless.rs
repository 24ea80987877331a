//! Headless office suite printing (Linux)
//!
//! `soffice --headless -p <file>` prints to the default printer,
//! `--pt <printer>` to a named one. Page setup is whatever the file carries;
//! exported workbooks already hold the mode's layout.

use super::{DocumentPrinter, PageLayout};
use despacho_printer::{PrintError, PrintResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, instrument, warn};

pub struct HeadlessOffice {
    binary: String,
    printer_name: Option<String>,
    document: Option<PathBuf>,
}

impl HeadlessOffice {
    pub fn new(binary: impl Into<String>, printer_name: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            printer_name,
            document: None,
        }
    }

    /// Command-line arguments for printing `path`
    pub fn args(&self, path: &Path) -> Vec<String> {
        let mut args = vec!["--headless".to_string()];
        match &self.printer_name {
            Some(name) => {
                args.push("--pt".to_string());
                args.push(name.clone());
            }
            None => args.push("-p".to_string()),
        }
        args.push(path.to_string_lossy().into_owned());
        args
    }
}

impl DocumentPrinter for HeadlessOffice {
    fn name(&self) -> &'static str {
        "headless-office"
    }

    fn open(&mut self, path: &Path) -> PrintResult<()> {
        self.document = Some(path.to_path_buf());
        Ok(())
    }

    fn apply_layout(&mut self, layout: &PageLayout) -> PrintResult<()> {
        debug!(landscape = layout.landscape, "Layout taken from the document");
        Ok(())
    }

    #[instrument(skip(self), fields(binary = %self.binary))]
    fn print(&mut self) -> PrintResult<()> {
        let Some(path) = self.document.as_deref() else {
            return Err(PrintError::Automation("No document open".to_string()));
        };

        let output = Command::new(&self.binary)
            .args(self.args(path))
            .output()
            .map_err(|e| {
                PrintError::Automation(format!("Failed to start {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "Office process failed");
            return Err(PrintError::Automation(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        info!(path = %path.display(), "Print command issued");
        Ok(())
    }

    fn close(&mut self) -> PrintResult<()> {
        self.document = None;
        Ok(())
    }
}
