//! Subcommand handlers

use super::{Commands, LabelArgs};
use crate::autoload::{DEFAULT_EXTENSIONS, LatestFile, detect, select};
use crate::core::AppContext;
use crate::printing::document;
use crate::sheet::{PrintProfile, Sheet, read_sheet, write_sheet};
use serde_json::{Value, json};
use shared::{AppError, AppResult, ErrorCode, FileCandidate, Mode, Record};
use std::path::Path;
use tracing::{info, instrument};

/// Successful result of a subcommand
#[derive(Debug)]
pub struct Outcome {
    pub message: String,
    pub data: Value,
    /// Extra text for plain output (tables, ZPL)
    pub body: Option<String>,
}

impl Outcome {
    fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
            body: None,
        }
    }

    fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// Dispatch one subcommand
pub async fn run(ctx: &AppContext, command: Commands) -> AppResult<Outcome> {
    match command {
        Commands::Detect { file } => Ok(detect_file(&file)),
        Commands::Latest { mode, dir } => {
            let dir = dir.as_deref().unwrap_or(ctx.downloads_dir());
            let candidate = latest(mode, dir)?;
            Ok(Outcome::new(
                format!("Latest {} file: {}", mode, candidate.path.display()),
                json!({
                    "status": "ok",
                    "mode": mode,
                    "path": candidate.path,
                    "modified": candidate.modified,
                }),
            ))
        }
        Commands::Preview { file, limit } => preview(&file, limit),
        Commands::Label(args) => label(ctx, args).await,
        Commands::Print { mode, file } => print(ctx, mode, file.as_deref()).await,
        Commands::Export { mode, file, out } => export(mode, &file, &out),
    }
}

fn detect_file(file: &Path) -> Outcome {
    let mode = detect(file);
    let message = match mode {
        Some(mode) => format!("{} is a {} file", file.display(), mode),
        None => format!("{} matches no mode", file.display()),
    };
    Outcome::new(message, json!({ "file": file, "mode": mode }))
}

/// Latest file for a mode, with empty and no-match folders as errors
fn latest(mode: Mode, dir: &Path) -> AppResult<FileCandidate> {
    let result = select(mode, dir, &DEFAULT_EXTENSIONS);
    let status = result.status().as_str();
    match result {
        LatestFile::Found(candidate) => Ok(candidate),
        LatestFile::EmptyFolder => Err(AppError::with_message(
            ErrorCode::FolderEmpty,
            format!("Folder {} is missing or empty", dir.display()),
        )
        .with_detail("status", status)
        .with_detail("dir", dir.display().to_string())),
        LatestFile::NoMatch => Err(AppError::with_message(
            ErrorCode::NoMatchingFile,
            format!("No {} file in {}", mode, dir.display()),
        )
        .with_detail("status", status)
        .with_detail("mode", mode.as_str())
        .with_detail("dir", dir.display().to_string())),
    }
}

fn preview(file: &Path, limit: usize) -> AppResult<Outcome> {
    let sheet = read_sheet(file)?;
    let shown: Vec<&Record> = sheet.rows().iter().take(limit).collect();

    let mut table = sheet.headers().join("\t");
    for record in &shown {
        table.push('\n');
        let cells: Vec<&str> = sheet
            .headers()
            .iter()
            .map(|h| record.get(h).unwrap_or_default())
            .collect();
        table.push_str(&cells.join("\t"));
    }

    Ok(Outcome::new(
        format!("{} rows in {} (showing {})", sheet.len(), file.display(), shown.len()),
        json!({
            "path": file,
            "headers": sheet.headers(),
            "rows": shown,
            "total": sheet.len(),
        }),
    )
    .with_body(table))
}

/// Records selected by the label arguments
fn label_records(args: &LabelArgs) -> AppResult<Vec<Record>> {
    let Some(file) = &args.file else {
        let record: Record = args.fields.iter().map(|(k, v)| (k, v.clone())).collect();
        return Ok(vec![record]);
    };

    let sheet = read_sheet(file)?;
    if sheet.is_empty() {
        return Err(AppError::new(ErrorCode::SheetEmpty)
            .with_detail("path", file.display().to_string()));
    }

    match args.row {
        None => Ok(sheet.into_rows()),
        Some(row) => {
            let total = sheet.len();
            let record = row
                .checked_sub(1)
                .and_then(|idx| sheet.row(idx))
                .cloned()
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::LabelRowOutOfRange,
                        format!("Row {} is outside 1..={}", row, total),
                    )
                    .with_detail("row", row)
                    .with_detail("rows", total)
                })?;
            Ok(vec![record])
        }
    }
}

#[instrument(skip(ctx, args), fields(dry_run = args.dry_run))]
async fn label(ctx: &AppContext, args: LabelArgs) -> AppResult<Outcome> {
    let records = label_records(&args)?;
    let copies = args.copies.unwrap_or(ctx.config().label_copies);
    let service = ctx.label_service();

    if args.dry_run {
        let zpl = service.render_batch(&records)?;
        return Ok(Outcome::new(
            format!("Rendered {} label(s)", records.len()),
            json!({ "labels": records.len(), "bytes": zpl.len(), "zpl": zpl }),
        )
        .with_body(zpl));
    }

    service.print_records(&records, copies).await?;
    info!(labels = records.len(), copies, "Label job complete");
    Ok(Outcome::new(
        format!(
            "Sent {} label(s) x{} to {}",
            records.len(),
            copies,
            service.target()
        ),
        json!({
            "labels": records.len(),
            "copies": copies,
            "target": service.target(),
        }),
    ))
}

async fn print(ctx: &AppContext, mode: Mode, file: Option<&Path>) -> AppResult<Outcome> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => latest(mode, ctx.downloads_dir())?.path,
    };

    let sheet: Sheet = read_sheet(&path)?;
    document::print_records(ctx.config(), mode, &sheet).await?;

    Ok(Outcome::new(
        format!("Sent {} to the printer", path.display()),
        json!({ "mode": mode, "path": path, "rows": sheet.len() }),
    ))
}

fn export(mode: Mode, file: &Path, out: &Path) -> AppResult<Outcome> {
    let sheet = read_sheet(file)?;
    write_sheet(&sheet, &PrintProfile::for_mode(mode), out)?;
    Ok(Outcome::new(
        format!("Wrote {} rows to {}", sheet.len(), out.display()),
        json!({ "mode": mode, "path": out, "rows": sheet.len() }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppConfig;

    fn write_csv(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    const SHIPMENTS: &str = "razsoc;dir;comuna;ciudad;guia;bultos;transporte\n\
        Andes SpA;Av. Sur 1;Maipú;Santiago;000111222;2;Urbano\n\
        Costa Ltda;Calle 2;Viña del Mar;Valparaíso;000333444;1;Urbano\n";

    #[test]
    fn test_detect_file() {
        let outcome = detect_file(Path::new("123456789.xlsx"));
        assert_eq!(outcome.data["mode"], "urbano");
        assert_eq!(detect_file(Path::new("notes.txt")).data["mode"], Value::Null);
    }

    #[test]
    fn test_latest_errors_carry_status() {
        let dir = tempfile::tempdir().unwrap();
        let err = latest(Mode::Urbano, dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FolderEmpty);

        write_csv(dir.path(), "notes.csv", "a\n1\n");
        let err = latest(Mode::Urbano, dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoMatchingFile);
        assert_eq!(err.details.unwrap()["status"], "no_match");
    }

    #[tokio::test]
    async fn test_label_dry_run_from_file_row() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_csv(dir.path(), "123456789.csv", SHIPMENTS);
        let ctx = AppContext::new(AppConfig::default());

        let outcome = label(
            &ctx,
            LabelArgs {
                file: Some(file),
                row: Some(2),
                fields: vec![],
                copies: None,
                dry_run: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.data["labels"], 1);
        let zpl = outcome.body.unwrap();
        assert!(zpl.contains("^FD000333444^FS"));
        assert!(!zpl.contains("000111222"));
    }

    #[tokio::test]
    async fn test_label_row_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_csv(dir.path(), "123456789.csv", SHIPMENTS);
        let ctx = AppContext::new(AppConfig::default());

        for row in [0, 3] {
            let err = label(
                &ctx,
                LabelArgs {
                    file: Some(file.clone()),
                    row: Some(row),
                    fields: vec![],
                    copies: None,
                    dry_run: true,
                },
            )
            .await
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::LabelRowOutOfRange);
        }
    }

    #[tokio::test]
    async fn test_label_from_header_only_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_csv(dir.path(), "123456789.csv", "razsoc;dir;guia\n");
        let ctx = AppContext::new(AppConfig::default());

        let err = label(
            &ctx,
            LabelArgs {
                file: Some(file),
                row: None,
                fields: vec![],
                copies: None,
                dry_run: true,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::SheetEmpty);
        assert_eq!(err.message, "Spreadsheet has no data rows");
    }

    #[tokio::test]
    async fn test_label_fields_missing_key() {
        let ctx = AppContext::new(AppConfig::default());
        let err = label(
            &ctx,
            LabelArgs {
                file: None,
                row: None,
                fields: vec![("guia".into(), "000123456".into())],
                copies: None,
                dry_run: true,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::LabelFieldMissing);
    }

    #[test]
    fn test_preview_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_csv(dir.path(), "123456789.csv", SHIPMENTS);

        let outcome = preview(&file, 1).unwrap();
        assert_eq!(outcome.data["total"], 2);
        assert_eq!(outcome.data["rows"].as_array().unwrap().len(), 1);
        assert!(outcome.body.unwrap().starts_with("razsoc\tdir\tcomuna"));

        let out = dir.path().join("urbano.xlsx");
        export(Mode::Urbano, &file, &out).unwrap();
        let back = read_sheet(&out).unwrap();
        assert_eq!(back.row(1).unwrap().get("guia"), Some("000333444"));
    }
}
