//! Label and Document Printing Module
//!
//! - Labels: shipment records rendered to ZPL and sent to the Zebra printer
//! - Documents: formatted spreadsheets printed through the office suite

pub mod document;
pub mod labels;
pub mod renderer;

pub use document::{
    DocumentError, DocumentPrinter, DocumentResult, ExcelAutomation, HeadlessOffice, PageLayout,
    select_document_printer,
};
pub use labels::{LabelPrintError, LabelPrintResult, LabelService, transmit};
pub use renderer::{LabelError, LabelResult, REQUIRED_FIELDS, ShippingLabelRenderer, generate};
