// Plain-text report export

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use crate::report::Report;

const COLUMN_GAP: &str = "  ";

/// Render the report as aligned plain text.
///
/// Layout: title, underline, blank, summary lines, blank, table. The last
/// column (Total Sales) is right-aligned, the rest left-aligned.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&"=".repeat(UnicodeWidthStr::width(report.title.as_str())));
    out.push_str("\n\n");

    for line in &report.summary_lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    let rows = report.table.to_string_rows();
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut widths = vec![0usize; ncols];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i + 1 == ncols {
                    pad_left(cell, widths[i])
                } else {
                    pad_right(cell, widths[i])
                }
            })
            .collect();
        out.push_str(cells.join(COLUMN_GAP).trim_end());
        out.push('\n');
    }
    out
}

pub fn export(report: &Report, path: &Path) -> Result<(), String> {
    std::fs::write(path, render(report)).map_err(|e| e.to_string())
}

fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(sw)))
}

fn pad_left(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(sw)), s)
}
