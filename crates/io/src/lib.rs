// File I/O operations

pub mod csv;
pub mod json;
pub mod report;
pub mod text;
pub mod xlsx;

pub use json::{load_records, parse_records, LoadError};
pub use report::{write_report, Report, ReportFormat};
