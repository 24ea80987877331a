//! Printer Target Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where print output is sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrinterTarget {
    /// Raw TCP printer (Zebra on port 9100)
    Network { host: String, port: u16 },
    /// Printer installed in the operating system, by name
    Named { name: String },
}

impl PrinterTarget {
    pub fn network(host: impl Into<String>, port: u16) -> Self {
        Self::Network {
            host: host.into(),
            port,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }
}

impl fmt::Display for PrinterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { host, port } => write!(f, "{}:{}", host, port),
            Self::Named { name } => f.write_str(name),
        }
    }
}
