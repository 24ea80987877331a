//! Operation Mode Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which filename heuristic and print formatting rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// FedEx shipment reports
    Fedex,
    /// Urbano guide files (nine digit file names)
    Urbano,
    /// Sales document listings
    Listados,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Urbano, Mode::Fedex, Mode::Listados];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fedex => "fedex",
            Mode::Urbano => "urbano",
            Mode::Listados => "listados",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected fedex, urbano or listados)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fedex" => Ok(Mode::Fedex),
            "urbano" => Ok(Mode::Urbano),
            "listados" => Ok(Mode::Listados),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}
