//! Command-line front end
//!
//! Every subcommand resolves to exactly one [`shared::Notice`]: printed as
//! JSON with `--json`, as plain text otherwise.

pub mod commands;

pub use commands::{Outcome, run};

use clap::{Args, Parser, Subcommand};
use shared::Mode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "despacho")]
#[command(about = "Shipping file autoload, label and document printing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (JSON)
    #[arg(long, global = true, env = "DESPACHO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `despacho=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to a daily rolling file in this directory
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print the resulting notice as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which mode a file name belongs to
    Detect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Find the newest file for a mode in the downloads folder
    Latest {
        #[arg(long)]
        mode: Mode,

        /// Folder to scan instead of the configured downloads folder
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show the headers and first rows of a sheet
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Render shipping labels and send them to the Zebra printer
    Label(LabelArgs),

    /// Print a sheet through the office suite with the mode's layout
    Print {
        #[arg(long)]
        mode: Mode,

        /// Sheet to print; defaults to the latest file for the mode
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Write a sheet as a formatted workbook without printing
    Export {
        #[arg(long)]
        mode: Mode,

        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "OUT")]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Sheet holding one shipment per row
    #[arg(long, conflicts_with = "fields", required_unless_present = "fields")]
    pub file: Option<PathBuf>,

    /// Only label this data row (1-based)
    #[arg(long, requires = "file")]
    pub row: Option<usize>,

    /// Label fields given directly, e.g. `--field guia=000123456`
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Times the batch is sent; defaults to `label_copies` from the config
    #[arg(long)]
    pub copies: Option<u32>,

    /// Print the ZPL instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty field name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
