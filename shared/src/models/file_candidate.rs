//! File Candidate Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A file found by a directory scan, with its modification time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

impl FileCandidate {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified: modified.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
