//! Per-mode print formatting rules

use shared::Mode;

/// How a mode's sheet is laid out on paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintProfile {
    pub mode: Mode,
    /// Worksheet name in exported workbooks
    pub sheet_name: &'static str,
    /// Tracking-number column kept as text so leading zeros survive
    pub text_column: Option<&'static str>,
    pub landscape: bool,
    /// Left footer text; page numbers go in the right footer
    pub footer_title: &'static str,
}

impl PrintProfile {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Fedex => Self {
                mode,
                sheet_name: "FedEx",
                text_column: Some("tracking"),
                landscape: true,
                footer_title: "FedEx",
            },
            Mode::Urbano => Self {
                mode,
                sheet_name: "Urbano",
                text_column: Some("guia"),
                landscape: false,
                footer_title: "Urbano",
            },
            Mode::Listados => Self {
                mode,
                sheet_name: "Listado",
                text_column: None,
                landscape: false,
                footer_title: "Listado de documentos de venta",
            },
        }
    }

    /// Page number footer, in the `&P`/`&N` syntax shared by Excel and xlsx
    pub fn page_footer(&self) -> &'static str {
        "&P de &N"
    }

    /// Complete footer string for an xlsx header/footer record
    pub fn xlsx_footer(&self) -> String {
        format!("&L{}&R{}", self.footer_title, self.page_footer())
    }
}
