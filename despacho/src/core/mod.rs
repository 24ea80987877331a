//! Core module: configuration, context and error mapping
//!
//! - [`AppConfig`] - file + environment configuration
//! - [`AppContext`] - passed explicitly to every action

pub mod config;
pub mod context;
pub mod error;

pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use context::AppContext;
pub use error::print_error;
