//! Label print service
//!
//! Renders shipment records and sends them to the Zebra printer.

use super::renderer::{LabelError, ShippingLabelRenderer};
use despacho_printer::{NetworkPrinter, PrintError, Printer};
use shared::{PrinterTarget, Record};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum LabelPrintError {
    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

pub type LabelPrintResult<T> = Result<T, LabelPrintError>;

/// Send an already rendered label `count` times on one connection
#[instrument(skip(zpl, timeout), fields(target = %target, bytes = zpl.len()))]
pub async fn transmit(
    zpl: &str,
    target: &PrinterTarget,
    count: u32,
    timeout: Duration,
) -> Result<(), PrintError> {
    let printer = network_printer(target)?.with_timeout(timeout);
    printer.print_copies(zpl.as_bytes(), count).await
}

fn network_printer(target: &PrinterTarget) -> Result<NetworkPrinter, PrintError> {
    match target {
        PrinterTarget::Network { host, port } => NetworkPrinter::new(host, *port),
        PrinterTarget::Named { name } => Err(PrintError::InvalidConfig(format!(
            "Label printer must be a network address, got named printer {}",
            name
        ))),
    }
}

/// Label print service
///
/// Owns the renderer and the printer connection settings for one target.
pub struct LabelService {
    renderer: ShippingLabelRenderer,
    target: PrinterTarget,
    timeout: Duration,
}

impl LabelService {
    pub fn new(target: PrinterTarget, timeout: Duration) -> Self {
        Self {
            renderer: ShippingLabelRenderer::default(),
            target,
            timeout,
        }
    }

    pub fn target(&self) -> &PrinterTarget {
        &self.target
    }

    /// Render every record into one ZPL stream
    ///
    /// A record missing a required key aborts the whole batch.
    pub fn render_batch(&self, records: &[Record]) -> Result<String, LabelError> {
        records
            .iter()
            .map(|r| self.renderer.render(r))
            .collect::<Result<Vec<_>, _>>()
            .map(|labels| labels.concat())
    }

    /// Render and print records; the batch is sent `copies` times
    ///
    /// Copies are collated: records `A B` with two copies print `A B A B`.
    ///
    /// Rendering completes before the printer is contacted, so bad data never
    /// produces a half-printed batch.
    #[instrument(skip(self, records), fields(target = %self.target, records = records.len()))]
    pub async fn print_records(&self, records: &[Record], copies: u32) -> LabelPrintResult<()> {
        if records.is_empty() {
            return Err(PrintError::InvalidConfig("No records to print".to_string()).into());
        }

        let zpl = self.render_batch(records)?;
        transmit(&zpl, &self.target, copies, self.timeout).await?;

        info!(copies, "Labels sent");
        Ok(())
    }
}
