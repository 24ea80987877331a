//! File autoloading
//!
//! - [`matcher`]: classify a filename into a [`Mode`](shared::Mode)
//! - [`selector`]: newest matching file in a folder

pub mod matcher;
pub mod selector;

pub use matcher::{classify, detect};
pub use selector::{DEFAULT_EXTENSIONS, LatestFile, SelectStatus, select};
