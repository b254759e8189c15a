use serde::Serialize;

use crate::model::SalesRecord;

pub const TABLE_HEADER: [&str; 4] = ["ID", "Car", "Price", "Total Sales"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub car: String,
    pub price: String,
    pub total_sales: u64,
}

/// Row-oriented view of the raw input for the report renderer.
/// Rows keep input order; price is the original text, not the parsed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub rows: Vec<TableRow>,
}

impl ReportTable {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| TableRow {
                id: r.id.to_string(),
                car: r.car.display_name(),
                price: r.price.clone(),
                total_sales: r.total_sales,
            })
            .collect();
        Self { rows }
    }

    pub fn header(&self) -> [&'static str; 4] {
        TABLE_HEADER
    }

    /// Header row followed by one row per record, all as text.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(TABLE_HEADER.iter().map(|h| h.to_string()).collect());
        for row in &self.rows {
            out.push(vec![
                row.id.clone(),
                row.car.clone(),
                row.price.clone(),
                row.total_sales.to_string(),
            ]);
        }
        out
    }
}
