//! Application configuration
//!
//! Loaded from a JSON file, then overridden from the environment:
//!
//! | Key / env var | Default | Meaning |
//! |---------------|---------|---------|
//! | `zebra_ip` / `ZEBRA_IP` | 192.168.0.100 | label printer host |
//! | `zebra_port` / `ZEBRA_PORT` | 9100 | label printer raw TCP port |
//! | `downloads_dir` / `DOWNLOADS_DIR` | `~/Downloads` | folder scanned for shipping files |
//! | `office_bin` / `OFFICE_BIN` | soffice | office suite executable (Linux) |
//! | `printer_name` / `PRINTER_NAME` | system default | document printer |
//! | `label_copies` | 1 | copies per label |
//! | `connect_timeout_ms` | 5000 | label printer connect/write timeout |
//!
//! A missing or unreadable file is not fatal: defaults are used and a
//! warning is logged.

use despacho_printer::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use shared::{AppError, PrinterTarget};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "despacho.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub zebra_ip: String,
    pub zebra_port: u16,
    pub downloads_dir: PathBuf,
    pub office_bin: String,
    pub printer_name: Option<String>,
    pub label_copies: u32,
    pub connect_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zebra_ip: "192.168.0.100".into(),
            zebra_port: DEFAULT_PORT,
            downloads_dir: default_downloads_dir(),
            office_bin: "soffice".into(),
            printer_name: None,
            label_copies: 1,
            connect_timeout_ms: 5000,
        }
    }
}

fn default_downloads_dir() -> PathBuf {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(|home| PathBuf::from(home).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

impl AppConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file (falling back to defaults) and apply env overrides
    pub fn load(path: Option<&Path>) -> Self {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with overrides taken from `lookup`
    pub fn load_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let mut config = match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "Config loaded");
                config
            }
            Err(e) => {
                let err = AppError::from(e);
                warn!(code = %err.code, error = %err.message, "Using default configuration");
                Self::default()
            }
        };
        config.apply_overrides(lookup);
        config
    }

    /// Override fields from a key lookup (blank values are ignored)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(ip) = get("ZEBRA_IP") {
            self.zebra_ip = ip.trim().to_string();
        }
        if let Some(port) = get("ZEBRA_PORT") {
            match port.trim().parse() {
                Ok(p) => self.zebra_port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid ZEBRA_PORT"),
            }
        }
        if let Some(dir) = get("DOWNLOADS_DIR") {
            self.downloads_dir = PathBuf::from(dir);
        }
        if let Some(bin) = get("OFFICE_BIN") {
            self.office_bin = bin;
        }
        if let Some(name) = get("PRINTER_NAME") {
            self.printer_name = Some(name);
        }
    }

    /// Zebra printer address
    pub fn label_target(&self) -> PrinterTarget {
        PrinterTarget::network(self.zebra_ip.clone(), self.zebra_port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let config = AppConfig::load_with(Some(&dir.path().join("missing.json")), |_| None);
        assert_eq!(config.label_target().to_string(), "192.168.0.100:9100");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("despacho.json");
        std::fs::write(&path, "{ zebra_ip: ").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_partial_file_and_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("despacho.json");
        std::fs::write(
            &path,
            r#"{"zebra_ip": "10.1.1.20", "label_copies": 2, "theme": "dark"}"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.zebra_ip, "10.1.1.20");
        assert_eq!(config.zebra_port, 9100);
        assert_eq!(config.label_copies, 2);
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ZEBRA_IP", " 10.0.0.7 "),
            ("ZEBRA_PORT", "6101"),
            ("PRINTER_NAME", "HP_Bodega"),
            ("OFFICE_BIN", ""),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.zebra_ip, "10.0.0.7");
        assert_eq!(config.zebra_port, 6101);
        assert_eq!(config.printer_name.as_deref(), Some("HP_Bodega"));
        assert_eq!(config.office_bin, "soffice");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|k| (k == "ZEBRA_PORT").then(|| "printer".to_string()));
        assert_eq!(config.zebra_port, 9100);
    }
}
