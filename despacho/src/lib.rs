//! despacho - shipping file autoload, label and document printing
//!
//! # Module structure
//!
//! ```text
//! despacho/src/
//! ├── core/          # config, context, error mapping
//! ├── autoload/      # filename matcher, latest-file selector
//! ├── sheet/         # xlsx/xls/csv reader, formatted xlsx writer
//! ├── printing/      # ZPL labels, office-suite document printing
//! ├── cli/           # clap front end
//! └── utils/         # logging
//! ```

pub mod autoload;
pub mod cli;
pub mod core;
pub mod printing;
pub mod sheet;
pub mod utils;

pub use crate::core::{AppConfig, AppContext};
pub use utils::logger::init_logger_with_file;
