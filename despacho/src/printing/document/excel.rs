//! Excel COM automation (Windows)
//!
//! The workbook is driven from a PowerShell script, so open, layout and
//! print all run inside one Excel session started at [`print`].
//!
//! [`print`]: DocumentPrinter::print

use super::{DocumentPrinter, PageLayout};
use despacho_printer::{PrintError, PrintResult};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempPath;
use tracing::{debug, info, instrument};

// XlPageOrientation
const XL_PORTRAIT: u8 = 1;
const XL_LANDSCAPE: u8 = 2;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct ExcelAutomation {
    printer_name: Option<String>,
    shell: String,
    document: Option<PathBuf>,
    layout: Option<PageLayout>,
}

impl ExcelAutomation {
    pub fn new(printer_name: Option<String>) -> Self {
        Self {
            printer_name,
            shell: "powershell".to_string(),
            document: None,
            layout: None,
        }
    }

    /// Override the PowerShell executable (e.g. `pwsh`)
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn run_script(&self, script: &str) -> PrintResult<()> {
        let script_file = write_script(script)?;
        debug!(script = %script_file.display(), "Running Excel script");

        let output = Command::new(&self.shell)
            .args(invocation_args(&script_file))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PrintError::Automation(format!("Failed to start {}: {}", self.shell, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        Err(PrintError::Automation(format!(
            "Excel automation failed ({}): {}",
            output.status, detail
        )))
    }
}

impl DocumentPrinter for ExcelAutomation {
    fn name(&self) -> &'static str {
        "excel"
    }

    fn open(&mut self, path: &Path) -> PrintResult<()> {
        let absolute = std::path::absolute(path)?;
        debug!(path = %absolute.display(), "Workbook queued for Excel");
        self.document = Some(absolute);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &PageLayout) -> PrintResult<()> {
        self.layout = Some(layout.clone());
        Ok(())
    }

    #[instrument(skip(self), fields(printer = ?self.printer_name))]
    fn print(&mut self) -> PrintResult<()> {
        let Some(path) = self.document.as_deref() else {
            return Err(PrintError::Automation("No workbook open".to_string()));
        };
        let layout = self.layout.clone().unwrap_or_else(|| PageLayout {
            landscape: false,
            fit_to_width: true,
            footer_left: String::new(),
            footer_right: String::new(),
            text_column: None,
        });

        let script = build_script(path, &layout, self.printer_name.as_deref());
        self.run_script(&script)?;
        info!("PrintOut issued");
        Ok(())
    }

    fn close(&mut self) -> PrintResult<()> {
        // The script closes without saving and quits Excel itself
        self.document = None;
        self.layout = None;
        Ok(())
    }
}

/// Save the script as a `.ps1`, removed when the returned path drops
///
/// Windows PowerShell reads a script without BOM in the ANSI code page, so
/// the BOM is required for non-ASCII workbook paths.
fn write_script(script: &str) -> PrintResult<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("despacho-")
        .suffix(".ps1")
        .tempfile()?;
    file.write_all(UTF8_BOM)?;
    file.write_all(script.as_bytes())?;
    file.flush()?;
    Ok(file.into_temp_path())
}

fn invocation_args(script: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-NoProfile",
        "-NonInteractive",
        "-ExecutionPolicy",
        "Bypass",
        "-File",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(script.as_os_str().to_owned());
    args
}

/// Single-quoted PowerShell literal
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn build_script(path: &Path, layout: &PageLayout, printer: Option<&str>) -> String {
    let mut s = String::with_capacity(2048);
    s.push_str("$ErrorActionPreference = 'Stop'\n");
    s.push_str("$excel = New-Object -ComObject Excel.Application\n");
    s.push_str("$excel.Visible = $false\n$excel.DisplayAlerts = $false\n");
    s.push_str("try {\n");
    s.push_str(&format!(
        "  $wb = $excel.Workbooks.Open({})\n",
        ps_quote(&path.to_string_lossy())
    ));
    s.push_str("  $ws = $wb.Worksheets.Item(1)\n");

    if let Some(column) = &layout.text_column {
        // Rewrite from Value2: `.Text` is the display (`7.94612E+11`, `####`)
        s.push_str(&format!(
            "  $hit = $ws.Rows.Item(1).Find({}, [Type]::Missing, -4163, 1)\n",
            ps_quote(column)
        ));
        s.push_str("  if ($hit -ne $null) {\n");
        s.push_str("    $last = $ws.UsedRange.Rows.Count\n");
        s.push_str("    for ($r = 2; $r -le $last; $r++) {\n");
        s.push_str("      $c = $ws.Cells.Item($r, $hit.Column)\n");
        s.push_str("      $v = $c.Value2\n");
        s.push_str("      if ($v -is [double]) { $t = '{0:0}' -f $v } else { $t = [string]$v }\n");
        s.push_str("      $c.NumberFormat = '@'\n      $c.Value2 = $t\n");
        s.push_str("    }\n  }\n");
    }

    s.push_str("  $ps = $ws.PageSetup\n");
    s.push_str(&format!(
        "  $ps.Orientation = {}\n",
        if layout.landscape {
            XL_LANDSCAPE
        } else {
            XL_PORTRAIT
        }
    ));
    if layout.fit_to_width {
        s.push_str("  $ps.Zoom = $false\n  $ps.FitToPagesWide = 1\n  $ps.FitToPagesTall = $false\n");
    }
    s.push_str("  $ps.PrintTitleRows = '$1:$1'\n");
    s.push_str(&format!("  $ps.LeftFooter = {}\n", ps_quote(&layout.footer_left)));
    s.push_str(&format!("  $ps.RightFooter = {}\n", ps_quote(&layout.footer_right)));

    match printer {
        Some(name) => s.push_str(&format!(
            "  $wb.PrintOut([Type]::Missing, [Type]::Missing, 1, $false, {})\n",
            ps_quote(name)
        )),
        None => s.push_str("  $wb.PrintOut()\n"),
    }
    s.push_str("  $wb.Close($false)\n");
    s.push_str("} catch {\n");
    s.push_str("  [Console]::Error.WriteLine($_.Exception.Message)\n");
    s.push_str("  exit 1\n");
    s.push_str("} finally {\n");
    s.push_str("  $excel.Quit()\n");
    s.push_str("  [void][System.Runtime.InteropServices.Marshal]::ReleaseComObject($excel)\n");
    s.push_str("}\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::PrintProfile;
    use shared::Mode;

    #[test]
    fn test_ps_quote() {
        assert_eq!(ps_quote("O'Higgins"), "'O''Higgins'");
    }

    #[test]
    fn test_script_for_fedex() {
        let layout = PageLayout::from(&PrintProfile::for_mode(Mode::Fedex));
        let script = build_script(
            Path::new(r"C:\Users\bodega\Downloads\shipment_report_2024-03-01.xlsx"),
            &layout,
            Some("HP LaserJet"),
        );

        assert!(script.contains(r"Open('C:\Users\bodega\Downloads\shipment_report_2024-03-01.xlsx')"));
        assert!(script.contains("$ps.Orientation = 2"));
        assert!(script.contains("$ps.FitToPagesWide = 1"));
        assert!(script.contains("$ps.LeftFooter = 'FedEx'"));
        assert!(script.contains("$ps.RightFooter = '&P de &N'"));
        assert!(script.contains("Find('tracking'"));
        assert!(script.contains("if ($v -is [double]) { $t = '{0:0}' -f $v } else { $t = [string]$v }"));
        assert!(!script.contains("$c.Text"));
        assert!(script.contains("PrintOut([Type]::Missing, [Type]::Missing, 1, $false, 'HP LaserJet')"));
        assert!(script.contains("$wb.Close($false)"));
        assert!(script.contains("} catch {\n  [Console]::Error.WriteLine($_.Exception.Message)\n  exit 1\n"));
    }

    #[test]
    fn test_script_runs_from_file() {
        let args = invocation_args(Path::new(r"C:\Temp\despacho-1.ps1"));
        assert_eq!(args[args.len() - 2], "-File");
        assert_eq!(args[args.len() - 1], r"C:\Temp\despacho-1.ps1");
        assert!(!args.iter().any(|a| a == "-Command"));
    }

    #[test]
    fn test_script_file_is_utf8_with_bom() {
        let layout = PageLayout::from(&PrintProfile::for_mode(Mode::Urbano));
        let script = build_script(
            Path::new(r"C:\Users\bodega\Ñuñoa\123456789.xlsx"),
            &layout,
            None,
        );

        let path = write_script(&script).unwrap();
        assert_eq!(path.extension().unwrap(), "ps1");
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap(), script);

        let kept = path.to_path_buf();
        drop(path);
        assert!(!kept.exists());
    }

    #[test]
    fn test_script_without_text_column() {
        let layout = PageLayout::from(&PrintProfile::for_mode(Mode::Listados));
        let script = build_script(Path::new("listado.xlsx"), &layout, None);
        assert!(!script.contains("NumberFormat"));
        assert!(script.contains("$ps.Orientation = 1"));
        assert!(script.contains("  $wb.PrintOut()\n"));
    }

    #[test]
    fn test_print_requires_open_document() {
        let mut excel = ExcelAutomation::new(None);
        assert!(matches!(excel.print(), Err(PrintError::Automation(_))));
    }

    #[test]
    fn test_missing_shell_is_automation_error() {
        let mut excel = ExcelAutomation::new(None).with_shell("despacho-no-such-shell");
        excel.open(Path::new("book.xlsx")).unwrap();
        match excel.print() {
            Err(PrintError::Automation(msg)) => assert!(msg.contains("despacho-no-such-shell")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
