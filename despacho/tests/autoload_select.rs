//! Latest-file selection against real directories

use despacho::autoload::{DEFAULT_EXTENSIONS, LatestFile, SelectStatus, select};
use shared::Mode;
use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

fn touch(dir: &Path, name: &str, age: Duration) {
    let file = File::create(dir.join(name)).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[test]
fn test_missing_folder_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let result = select(Mode::Urbano, dir.path().join("nope"), &DEFAULT_EXTENSIONS);
    assert_eq!(result, LatestFile::EmptyFolder);
    assert_eq!(result.status(), SelectStatus::EmptyFolder);
}

#[test]
fn test_empty_folder() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        select(Mode::Fedex, dir.path(), &DEFAULT_EXTENSIONS).status(),
        SelectStatus::EmptyFolder
    );
}

#[test]
fn test_file_instead_of_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "123456789.xlsx", Duration::ZERO);
    let result = select(
        Mode::Urbano,
        dir.path().join("123456789.xlsx"),
        &DEFAULT_EXTENSIONS,
    );
    assert_eq!(result, LatestFile::EmptyFolder);
}

#[test]
fn test_no_match() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "notes.txt", Duration::ZERO);
    touch(dir.path(), "12345.xlsx", Duration::ZERO);
    touch(dir.path(), "123456789.pdf", Duration::ZERO);
    std::fs::create_dir(dir.path().join("987654321.xlsx")).unwrap();

    let result = select(Mode::Urbano, dir.path(), &DEFAULT_EXTENSIONS);
    assert_eq!(result.status(), SelectStatus::NoMatch);
    assert!(result.path().is_none());
}

#[test]
fn test_newest_urbano_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "123456789.xlsx", Duration::from_secs(3600));
    touch(dir.path(), "987654321.csv", Duration::from_secs(60));
    touch(dir.path(), "lista_doc_venta_20240301_101500.xlsx", Duration::ZERO);

    let result = select(Mode::Urbano, dir.path(), &DEFAULT_EXTENSIONS);
    assert_eq!(result.status(), SelectStatus::Ok);
    assert_eq!(
        result.path().unwrap().file_name().unwrap(),
        "987654321.csv"
    );

    let listados = select(Mode::Listados, dir.path(), &DEFAULT_EXTENSIONS);
    assert_eq!(
        listados.path().unwrap().file_name().unwrap(),
        "lista_doc_venta_20240301_101500.xlsx"
    );
}

#[test]
fn test_equal_mtime_picks_smallest_path() {
    let dir = tempfile::tempdir().unwrap();
    let stamp = SystemTime::now() - Duration::from_secs(120);
    for name in ["shipment_report_2024-03-02.xlsx", "shipment_report_2024-03-01.xlsx"] {
        File::create(dir.path().join(name))
            .unwrap()
            .set_modified(stamp)
            .unwrap();
    }

    for _ in 0..3 {
        let result = select(Mode::Fedex, dir.path(), &DEFAULT_EXTENSIONS);
        assert_eq!(
            result.path().unwrap().file_name().unwrap(),
            "shipment_report_2024-03-01.xlsx"
        );
    }
}

#[test]
fn test_extension_filter_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "FedEx_envios.XLSX", Duration::ZERO);

    let result = select(Mode::Fedex, dir.path(), &DEFAULT_EXTENSIONS);
    assert_eq!(result.path().unwrap().file_name().unwrap(), "FedEx_envios.XLSX");

    assert_eq!(
        select(Mode::Fedex, dir.path(), &["csv"]).status(),
        SelectStatus::NoMatch
    );
}
