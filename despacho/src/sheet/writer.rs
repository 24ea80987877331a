//! Formatted workbook export
//!
//! Writes a [`Sheet`] as a print-ready `.xlsx`: bordered grid, bold header
//! repeated on every page, one page wide, mode footer with page numbers.

use super::{PrintProfile, Sheet, SheetResult};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{info, instrument};

/// A4 in the xlsx paper size table
const PAPER_A4: u8 = 9;

#[instrument(skip(sheet, profile, path), fields(mode = %profile.mode, path = %path.display()))]
pub fn write_sheet(sheet: &Sheet, profile: &PrintProfile, path: &Path) -> SheetResult<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xD9D9D9));
    let cell_format = Format::new().set_border(FormatBorder::Thin);
    let text_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format("@");

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(profile.sheet_name)?;
        write_headers(worksheet, sheet.headers(), &header_format)?;

        let text_col = profile
            .text_column
            .and_then(|name| sheet.headers().iter().position(|h| h == name));

        for (idx, record) in sheet.rows().iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, header) in sheet.headers().iter().enumerate() {
                let value = record.get(header).unwrap_or_default();
                let col_num = col as u16;

                if Some(col) == text_col {
                    worksheet.write_string_with_format(row, col_num, value, &text_format)?;
                } else if let Some(n) = as_plain_number(value) {
                    worksheet.write_number_with_format(row, col_num, n, &cell_format)?;
                } else {
                    worksheet.write_string_with_format(row, col_num, value, &cell_format)?;
                }
            }
        }

        apply_page_setup(worksheet, profile)?;
        worksheet.autofit();
    }

    workbook.save(path)?;
    info!(rows = sheet.len(), "Workbook written");
    Ok(())
}

fn write_headers(
    worksheet: &mut Worksheet,
    headers: &[String],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, format)?;
    }
    Ok(())
}

fn apply_page_setup(worksheet: &mut Worksheet, profile: &PrintProfile) -> Result<(), XlsxError> {
    if profile.landscape {
        worksheet.set_landscape();
    } else {
        worksheet.set_portrait();
    }
    worksheet.set_paper_size(PAPER_A4);
    // 0 pages tall: as many as needed
    worksheet.set_print_fit_to_pages(1, 0);
    worksheet.set_footer(&profile.xlsx_footer());
    worksheet.set_repeat_rows(0, 0)?;
    Ok(())
}

/// Plain decimal literal without a significant leading zero
///
/// `0012` stays text, as do exponents and `NaN`/`inf` spellings that
/// `f64::from_str` would accept.
fn as_plain_number(s: &str) -> Option<f64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || digits.starts_with('.') || digits.ends_with('.') {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') || digits.matches('.').count() > 1
    {
        return None;
    }
    let int_part = digits.split('.').next().unwrap_or_default();
    if int_part.len() > 1 && int_part.starts_with('0') {
        return None;
    }
    // Long digit runs are identifiers, not quantities
    if int_part.len() > 15 {
        return None;
    }
    s.parse().ok()
}
