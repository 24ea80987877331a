//! # despacho-printer
//!
//! ZPL thermal label printing - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ZPL II command building
//! - Escaping spreadsheet data for ZPL field data
//! - Network printing (raw TCP, port 9100)
//!
//! Business logic (WHAT to print) stays in the application crate:
//! - Shipping label layout → despacho::printing::renderer
//! - Spreadsheet printing → despacho::printing::document
//!
//! ## Example
//!
//! ```ignore
//! use despacho_printer::{NetworkPrinter, Printer, ZplBuilder};
//!
//! let mut label = ZplBuilder::new(800, 1200);
//! label.text(40, 40, 50, "Comercial Andes SpA");
//! label.code128(40, 700, 150, 3, "000123456");
//!
//! let printer = NetworkPrinter::new("192.168.0.100", 9100)?;
//! printer.print_copies(label.build().as_bytes(), 2).await?;
//! ```

mod error;
mod escape;
mod printer;
mod zpl;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escape::{HEX_INDICATOR, escape_field, needs_escape};
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};
pub use zpl::{Justify, ZplBuilder};
