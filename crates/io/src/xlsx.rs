// Excel (.xlsx) report export

use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook};

use crate::report::Report;

const SHEET_NAME: &str = "Report";

/// Approximate column widths (Excel character units) for ID, Car, Price, Total Sales.
const COLUMN_WIDTHS: [f64; 4] = [8.0, 32.0, 14.0, 12.0];

/// Export the report as a single-sheet workbook.
///
/// Row 0 holds the bold title, the summary lines follow one per row, then a
/// blank row, a bold header row and the data rows. Total Sales is written as a
/// number so the column sums in Excel; price stays text as it was in the input.
pub fn export(report: &Report, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let title_format = Format::new().set_bold().set_font_size(14);
    let header_format = Format::new().set_bold().set_border_bottom(FormatBorder::Thin);

    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet '{}': {}", SHEET_NAME, e))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("Failed to set column width: {}", e))?;
    }

    let mut row: u32 = 0;
    worksheet
        .write_string_with_format(row, 0, &report.title, &title_format)
        .map_err(|e| format!("Failed to write title: {}", e))?;
    row += 1;

    for line in &report.summary_lines {
        worksheet
            .write_string(row, 0, line)
            .map_err(|e| format!("Failed to write summary: {}", e))?;
        row += 1;
    }
    row += 1;

    for (col, name) in report.table.header().iter().enumerate() {
        worksheet
            .write_string_with_format(row, col as u16, *name, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }
    row += 1;

    for data in &report.table.rows {
        worksheet
            .write_string(row, 0, &data.id)
            .and_then(|ws| ws.write_string(row, 1, &data.car))
            .and_then(|ws| ws.write_string(row, 2, &data.price))
            .and_then(|ws| ws.write_number(row, 3, data.total_sales as f64))
            .map_err(|e| format!("Failed to write row {}: {}", row + 1, e))?;
        row += 1;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}
