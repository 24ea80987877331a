//! Latest-file selection
//!
//! Scans one directory (non-recursive) and returns the newest file that
//! passes the extension filter and the mode's filename heuristic.

use super::matcher::classify;
use serde::Serialize;
use shared::{FileCandidate, Mode};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Extensions accepted by default (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Status of a selection, as reported to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectStatus {
    Ok,
    EmptyFolder,
    NoMatch,
}

impl SelectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectStatus::Ok => "ok",
            SelectStatus::EmptyFolder => "empty_folder",
            SelectStatus::NoMatch => "no_match",
        }
    }
}

/// Outcome of a latest-file query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestFile {
    Found(FileCandidate),
    /// Directory absent, not a directory, or without entries
    EmptyFolder,
    /// Entries exist but none pass extension and mode filtering
    NoMatch,
}

impl LatestFile {
    pub fn status(&self) -> SelectStatus {
        match self {
            LatestFile::Found(_) => SelectStatus::Ok,
            LatestFile::EmptyFolder => SelectStatus::EmptyFolder,
            LatestFile::NoMatch => SelectStatus::NoMatch,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            LatestFile::Found(candidate) => Some(candidate.path()),
            _ => None,
        }
    }
}

fn has_allowed_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Select the most recently modified file for `mode` in `dir`
///
/// Ties on modification time go to the lexicographically smallest path, so
/// the answer does not depend on directory iteration order.
#[instrument(skip(dir, extensions), fields(dir = %dir.as_ref().display()))]
pub fn select(mode: Mode, dir: impl AsRef<Path>, extensions: &[&str]) -> LatestFile {
    let dir = dir.as_ref();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = %e, "Directory not readable");
            return LatestFile::EmptyFolder;
        }
    };

    let mut saw_entry = false;
    let mut best: Option<FileCandidate> = None;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                saw_entry = true;
                continue;
            }
        };
        saw_entry = true;

        let path = entry.path();
        // Follows symlinks, so a link to a report counts as a file
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping entry without metadata");
                continue;
            }
        };

        if !metadata.is_file()
            || !has_allowed_extension(&path, extensions)
            || !classify(&path, mode)
        {
            continue;
        }

        let modified = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping file without modification time");
                continue;
            }
        };

        let candidate = FileCandidate::new(path, modified);
        let newer = match &best {
            None => true,
            Some(current) => {
                candidate.modified > current.modified
                    || (candidate.modified == current.modified && candidate.path < current.path)
            }
        };
        if newer {
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) => {
            debug!(path = %candidate.path.display(), "Latest file selected");
            LatestFile::Found(candidate)
        }
        None if saw_entry => LatestFile::NoMatch,
        None => LatestFile::EmptyFolder,
    }
}
