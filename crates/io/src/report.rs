// Report artifact export

use std::path::Path;

use carsales_engine::{ReportTable, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
    Text,
}

impl ReportFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Csv => write!(f, "csv"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Everything a renderer needs: a title, the summary paragraph and the table.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub summary_lines: Vec<String>,
    pub table: ReportTable,
}

impl Report {
    pub fn new(title: impl Into<String>, summary: &Summary, table: ReportTable) -> Self {
        Self {
            title: title.into(),
            summary_lines: summary.lines().to_vec(),
            table,
        }
    }
}

pub fn write_report(path: &Path, format: ReportFormat, report: &Report) -> Result<(), String> {
    log::debug!("writing {format} report to {}", path.display());
    match format {
        ReportFormat::Xlsx => crate::xlsx::export(report, path),
        ReportFormat::Csv => crate::csv::export(&report.table, path),
        ReportFormat::Text => crate::text::export(report, path),
    }?;
    log::info!("wrote {} ({} rows)", path.display(), report.table.rows.len());
    Ok(())
}
