//! Spreadsheet reader
//!
//! - `.xlsx` / `.xls`: first worksheet via calamine
//! - `.csv`: csv crate, `;`/`,`/tab sniffed from the header line, UTF-8 with
//!   a Windows-1252 fallback (what Excel writes on Spanish-locale Windows)

use super::{Sheet, SheetError, SheetResult};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Load a sheet from disk, picking the parser by extension
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_sheet(path: &Path) -> SheetResult<Sheet> {
    if !path.is_file() {
        return Err(SheetError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let sheet = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        other => return Err(SheetError::Unsupported(other.to_string())),
    };

    info!(
        rows = sheet.len(),
        columns = sheet.headers().len(),
        "Sheet loaded"
    );
    Ok(sheet)
}

fn read_workbook(path: &Path) -> SheetResult<Sheet> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::OpenWorkbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)?
        .map_err(|e| SheetError::OpenWorkbook(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .skip_while(|cells| cells.iter().all(|c| c.is_empty()));

    let headers = rows.next().ok_or(SheetError::NoHeaderRow)?;
    Ok(Sheet::from_rows(headers, rows))
}

/// Render a cell as the text an operator sees in the grid
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) if d.hour() == 0 && d.minute() == 0 && d.second() == 0 => {
                d.format("%Y-%m-%d").to_string()
            }
            Some(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Whole numbers lose the `.0` spreadsheets attach to them
///
/// `123456789.0` is a guide number, not a float.
pub(crate) fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn read_csv(path: &Path) -> SheetResult<Sheet> {
    let bytes = std::fs::read(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(&bytes);
    let delimiter = sniff_delimiter(&text);
    debug!(delimiter = %(delimiter as char), "CSV delimiter");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SheetError::NoHeaderRow);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Sheet::from_rows(headers, rows))
}

/// UTF-8 (BOM stripped) when valid, otherwise Windows-1252
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

/// Pick the delimiter that occurs most often in the header line
pub(crate) fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    [b';', b',', b'\t']
        .into_iter()
        .map(|d| (d, first_line.bytes().filter(|b| *b == d).count()))
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(123456789.0), "123456789");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("guia;bultos;comuna\n1;2;3"), b';');
        assert_eq!(sniff_delimiter("guia,bultos\n"), b',');
        assert_eq!(sniff_delimiter("guia\tbultos\n"), b'\t');
        assert_eq!(sniff_delimiter("guia\n"), b',');
    }

    #[test]
    fn test_decode_windows_1252() {
        // "Ñuñoa" in Windows-1252
        let bytes = [0xD1, b'u', 0xF1, b'o', b'a'];
        assert_eq!(decode_text(&bytes), "Ñuñoa");
        assert_eq!(decode_text("\u{FEFF}Maipú".as_bytes()), "Maipú");
    }

    #[test]
    fn test_read_csv_semicolon_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123456789.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"Guia;Comuna;Bultos\r\n000123;\xD1u\xF1oa;2\r\n;;\r\n")
            .unwrap();
        drop(file);

        let sheet = read_sheet(&path).unwrap();
        assert_eq!(sheet.headers(), &["guia", "comuna", "bultos"]);
        assert_eq!(sheet.len(), 1);
        let row = sheet.row(0).unwrap();
        assert_eq!(row.get("guia"), Some("000123"));
        assert_eq!(row.get("comuna"), Some("Ñuñoa"));
    }

    #[test]
    fn test_missing_and_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.xlsx");
        assert!(matches!(read_sheet(&missing), Err(SheetError::NotFound(_))));

        let pdf = dir.path().join("report.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        assert!(matches!(read_sheet(&pdf), Err(SheetError::Unsupported(ext)) if ext == "pdf"));
    }
}
