use std::fmt;

use serde::Serialize;

use crate::model::SalesRecord;
use crate::money::Money;

/// The record with the highest revenue, plus that revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueWinner {
    pub record: SalesRecord,
    pub revenue: Money,
}

/// Units sold across all records of one model year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: u32,
    pub total_sales: u64,
}

/// Result of one aggregation pass. Owns copies of the winning records; the
/// input slice is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub top_revenue: RevenueWinner,
    pub top_sales: SalesRecord,
    pub top_year: YearTotal,
    /// Per-year totals in the order each year first appeared in the input.
    pub year_totals: Vec<YearTotal>,
    pub record_count: usize,
}

impl Summary {
    pub fn lines(&self) -> [String; 3] {
        [
            format!(
                "The {} generated the most revenue: {}",
                self.top_revenue.record.car.display_name(),
                self.top_revenue.revenue,
            ),
            format!(
                "The {} has the most sales: {}",
                self.top_sales.car.display_name(),
                self.top_sales.total_sales,
            ),
            format!(
                "The most popular year was {} with {} sales.",
                self.top_year.year, self.top_year.total_sales,
            ),
        ]
    }

    /// The three summary sentences joined by newlines. This is the report
    /// paragraph and the email body.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
