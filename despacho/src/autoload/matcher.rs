//! Filename classification
//!
//! Each mode recognizes the names its source system gives to exports:
//! - urbano: nine digit guide batch numbers (`123456789.xlsx`)
//! - listados: `lista_doc_venta_20240131_101500.xlsx`, or anything mentioning
//!   a listing or sale
//! - fedex: `shipment_report_2024-01-31.xlsx`, or anything mentioning fedex

use regex::Regex;
use shared::Mode;
use std::path::Path;
use std::sync::LazyLock;

static URBANO_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9}$").expect("valid urbano pattern"));

static LISTADOS_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^lista_doc_venta_[0-9]{8}_[0-9]{6}$").expect("valid listados pattern")
});

static FEDEX_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^shipment_report_[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid fedex pattern")
});

/// Does `filename` belong to `mode`?
///
/// Only the final path component is inspected. Never fails: anything that
/// cannot be read as a name simply does not match.
pub fn classify(filename: impl AsRef<Path>, mode: Mode) -> bool {
    let path = filename.as_ref();
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    match mode {
        Mode::Urbano => URBANO_STEM.is_match(stem),
        Mode::Listados => {
            if LISTADOS_STEM.is_match(stem) {
                return true;
            }
            let lower = stem.to_lowercase();
            lower.contains("listado") || lower.contains("venta")
        }
        Mode::Fedex => FEDEX_STEM.is_match(stem) || name.to_lowercase().contains("fedex"),
    }
}

/// First mode whose heuristic accepts `filename`
///
/// Checked from strictest to loosest: urbano, fedex, listados.
pub fn detect(filename: impl AsRef<Path>) -> Option<Mode> {
    let path = filename.as_ref();
    Mode::ALL.into_iter().find(|mode| classify(path, *mode))
}
