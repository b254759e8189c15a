use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SalesError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Opaque record identifier. Sales exports use integers; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "car_make", alias = "make")]
    pub make: String,
    #[serde(rename = "car_model", alias = "model")]
    pub model: String,
    #[serde(rename = "car_year", alias = "year")]
    pub year: u32,
}

impl Car {
    /// "Toyota Corolla (2019)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}

/// One car-sales entry. Price stays as the original currency text; it is
/// parsed during aggregation so a bad price surfaces with its record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: RecordId,
    pub car: Car,
    pub price: String,
    #[serde(rename = "total_sales", alias = "totalSales")]
    pub total_sales: u64,
}

impl SalesRecord {
    /// Checks the invariants serde's types can't express.
    /// `index` is the record's position in the input, for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), SalesError> {
        if self.car.year == 0 {
            return Err(SalesError::Schema {
                index,
                message: format!("record '{}': car_year must be a positive integer", self.id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_export_keys() {
        let json = r#"{"id":1,"car":{"car_make":"Acura","car_model":"TL","car_year":2005},"price":"$5522.75","total_sales":446}"#;
        let rec: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, RecordId::Int(1));
        assert_eq!(rec.car.display_name(), "Acura TL (2005)");
        assert_eq!(rec.price, "$5522.75");
        assert_eq!(rec.total_sales, 446);
    }

    #[test]
    fn deserialize_short_keys() {
        let json = r#"{"id":"a-7","car":{"make":"Honda","model":"Civic","year":2019},"price":"$20000.00","totalSales":5}"#;
        let rec: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id.to_string(), "a-7");
        assert_eq!(rec.car.make, "Honda");
        assert_eq!(rec.total_sales, 5);
    }

    #[test]
    fn negative_sales_rejected() {
        let json = r#"{"id":1,"car":{"car_make":"A","car_model":"B","car_year":2005},"price":"$1.00","total_sales":-3}"#;
        assert!(serde_json::from_str::<SalesRecord>(json).is_err());
    }

    #[test]
    fn string_year_rejected() {
        let json = r#"{"id":1,"car":{"car_make":"A","car_model":"B","car_year":"2005"},"price":"$1.00","total_sales":3}"#;
        assert!(serde_json::from_str::<SalesRecord>(json).is_err());
    }

    #[test]
    fn zero_year_fails_validation() {
        let json = r#"{"id":9,"car":{"car_make":"A","car_model":"B","car_year":0},"price":"$1.00","total_sales":3}"#;
        let rec: SalesRecord = serde_json::from_str(json).unwrap();
        let err = rec.validate(4).unwrap_err();
        assert!(matches!(err, SalesError::Schema { index: 4, .. }));
    }

    #[test]
    fn serialize_uses_export_keys() {
        let rec = SalesRecord {
            id: RecordId::Int(3),
            car: Car { make: "Ford".into(), model: "Focus".into(), year: 2012 },
            price: "$9.99".into(),
            total_sales: 2,
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["car"]["car_make"], "Ford");
        assert_eq!(v["total_sales"], 2);
    }
}
