use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesError {
    /// Price text is not a `$`-prefixed decimal amount.
    MalformedPrice { record_id: String, value: String, reason: String },
    /// No records to aggregate.
    EmptyInput,
    /// A record is missing a field or has a field of the wrong shape.
    Schema { index: usize, message: String },
    /// price × total_sales does not fit in i64 cents.
    RevenueOverflow { record_id: String },
    /// A model year's unit total does not fit in u64.
    SalesOverflow { year: u32 },
}

impl fmt::Display for SalesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPrice { record_id, value, reason } => {
                write!(f, "record '{record_id}': cannot parse price '{value}': {reason}")
            }
            Self::EmptyInput => write!(f, "no sales records to aggregate"),
            Self::Schema { index, message } => {
                write!(f, "record #{index}: {message}")
            }
            Self::RevenueOverflow { record_id } => {
                write!(f, "record '{record_id}': revenue overflows")
            }
            Self::SalesOverflow { year } => {
                write!(f, "total sales for model year {year} overflow")
            }
        }
    }
}

impl std::error::Error for SalesError {}
