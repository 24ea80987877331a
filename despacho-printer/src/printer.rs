//! Printer adapters for sending raw label data
//!
//! Supports network printers on raw TCP (port 9100). The printer never
//! answers on this channel, so a job counts as sent once every byte has been
//! written and flushed.

use crate::error::{PrintError, PrintResult};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Raw printing port used by Zebra and most thermal printers
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw printer data once
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        self.print_copies(data, 1).await
    }

    /// Send the same payload `copies` times in one job
    async fn print_copies(&self, data: &[u8], copies: u32) -> PrintResult<()>;
}

/// Network printer (TCP port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    ///
    /// `host` may be an IP address or a resolvable host name.
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Empty printer host".to_string()));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection and write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address as "host:port"
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn connect(&self) -> PrintResult<TcpStream> {
        let addr = self.addr();
        tokio::time::timeout(self.timeout, TcpStream::connect((self.host.as_str(), self.port)))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", addr, e)))
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn print_copies(&self, data: &[u8], copies: u32) -> PrintResult<()> {
        if copies == 0 {
            return Err(PrintError::InvalidConfig(
                "Copies must be at least 1".to_string(),
            ));
        }

        info!("Connecting to printer");
        let mut stream = self.connect().await?;

        info!(copies, "Connected, sending {} bytes per copy", data.len());

        for copy in 1..=copies {
            tokio::time::timeout(self.timeout, stream.write_all(data))
                .await
                .map_err(|_| {
                    PrintError::Timeout(format!("Write timeout on copy {}/{}", copy, copies))
                })?
                .map_err(|e| {
                    PrintError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Write failed on copy {}/{}: {}", copy, copies, e),
                    ))
                })?;
        }

        stream.flush().await?;
        // Best effort: the printer may already have closed its side
        if let Err(e) = stream.shutdown().await {
            warn!(error = %e, "Shutdown after print failed");
        }

        info!("Print job sent successfully");
        Ok(())
    }

}
