// JSON sales data import

use std::fmt;
use std::path::Path;

use carsales_engine::{SalesError, SalesRecord};

#[derive(Debug)]
pub enum LoadError {
    /// File could not be read.
    Read { path: String, message: String },
    /// Not valid JSON at all.
    Json(String),
    /// Valid JSON, but a record does not fit the sales record contract.
    Records(SalesError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Json(msg) => write!(f, "invalid JSON: {msg}"),
            Self::Records(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<SalesError> for LoadError {
    fn from(err: SalesError) -> Self {
        Self::Records(err)
    }
}

/// Load a JSON array of sales records from disk.
pub fn load_records(path: &Path) -> Result<Vec<SalesRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let records = parse_records(&content)?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a JSON array of sales records.
///
/// Records are decoded one at a time so a schema error names the offending
/// index instead of a byte offset.
pub fn parse_records(json: &str) -> Result<Vec<SalesRecord>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| LoadError::Json(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(SalesError::Schema {
            index: 0,
            message: "expected a JSON array of records".into(),
        }
        .into());
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record: SalesRecord = serde_json::from_value(item)
            .map_err(|e| SalesError::Schema { index, message: e.to_string() })?;
        record.validate(index)?;
        records.push(record);
    }
    Ok(records)
}
