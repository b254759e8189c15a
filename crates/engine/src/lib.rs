//! `carsales-engine`: sales aggregation engine.
//!
//! Pure engine crate: receives pre-loaded sales records, returns the winners
//! (top revenue, top unit sales, most popular model year) and the report table.
//! No CLI or IO dependencies.

pub mod aggregate;
pub mod error;
pub mod model;
pub mod money;
pub mod summary;
pub mod table;

pub use aggregate::aggregate;
pub use error::SalesError;
pub use model::{Car, RecordId, SalesRecord};
pub use money::Money;
pub use summary::{RevenueWinner, Summary, YearTotal};
pub use table::{ReportTable, TableRow};
