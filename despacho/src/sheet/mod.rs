//! Spreadsheet I/O
//!
//! Shipping files arrive as `.xlsx`, `.xls` or `.csv`; they are loaded into
//! a [`Sheet`] of [`Record`]s and, for printing, written back out as a
//! formatted `.xlsx` following the mode's [`PrintProfile`].

pub mod profile;
pub mod reader;
pub mod writer;

pub use profile::PrintProfile;
pub use reader::read_sheet;
pub use writer::write_sheet;

use serde::Serialize;
use shared::Record;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook: {0}")]
    OpenWorkbook(String),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("worksheet has no header row")]
    NoHeaderRow,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

pub type SheetResult<T> = Result<T, SheetError>;

/// Header row plus data rows of one worksheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Sheet {
    /// Build a sheet from raw header and row cells
    ///
    /// Headers are normalized like record keys. Blank headers become
    /// `col<N>` (1-based) and repeated headers get a `_<N>` suffix so no
    /// column is lost. Rows where every cell is blank are dropped.
    pub fn from_rows<I>(raw_headers: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut headers: Vec<String> = Vec::with_capacity(raw_headers.len());
        for (idx, raw) in raw_headers.iter().enumerate() {
            let mut name = Record::normalize_key(raw);
            if name.is_empty() {
                name = format!("col{}", idx + 1);
            }
            if headers.contains(&name) {
                let mut n = 2;
                while headers.contains(&format!("{}_{}", name, n)) {
                    n += 1;
                }
                name = format!("{}_{}", name, n);
            }
            headers.push(name);
        }

        let rows = rows
            .into_iter()
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells.into_iter().chain(std::iter::repeat(String::new())))
                    .map(|(h, v)| (h.as_str(), v))
                    .collect::<Record>()
            })
            .filter(|record| !record.is_blank())
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}
