// Property-based tests for the aggregation pass.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use carsales_engine::{aggregate, Car, Money, RecordId, SalesError, SalesRecord};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// (price_cents, total_sales, year). Narrow ranges so ties are common.
fn arb_fields() -> impl Strategy<Value = (i64, u64, u32)> {
    (
        prop_oneof![3 => 0i64..2_000_000, 1 => Just(10_000i64), 1 => Just(5_000i64)],
        prop_oneof![3 => 0u64..5_000, 1 => Just(10u64), 1 => Just(20u64)],
        2015u32..2021,
    )
}

fn arb_records() -> impl Strategy<Value = Vec<SalesRecord>> {
    prop::collection::vec(arb_fields(), 1..40).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (cents, sales, year))| SalesRecord {
                id: RecordId::Int(i as i64),
                car: Car { make: format!("Make{}", i % 7), model: format!("M{i}"), year },
                price: Money::from_cents(cents).to_string(),
                total_sales: sales,
            })
            .collect()
    })
}

fn revenue(r: &SalesRecord) -> Money {
    Money::parse_price(&r.price).unwrap().checked_mul(r.total_sales).unwrap()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn top_revenue_is_first_maximum(records in arb_records()) {
        let s = aggregate(&records).unwrap();
        let max = records.iter().map(revenue).max().unwrap();
        prop_assert_eq!(s.top_revenue.revenue, max);

        let first = records.iter().position(|r| revenue(r) == max).unwrap();
        prop_assert_eq!(&s.top_revenue.record, &records[first]);
    }

    #[test]
    fn top_sales_is_first_maximum(records in arb_records()) {
        let s = aggregate(&records).unwrap();
        let max = records.iter().map(|r| r.total_sales).max().unwrap();
        prop_assert_eq!(s.top_sales.total_sales, max);

        let first = records.iter().position(|r| r.total_sales == max).unwrap();
        prop_assert_eq!(&s.top_sales, &records[first]);
    }

    #[test]
    fn year_totals_conserve_sales(records in arb_records()) {
        let s = aggregate(&records).unwrap();
        let by_year: u64 = s.year_totals.iter().map(|t| t.total_sales).sum();
        let direct: u64 = records.iter().map(|r| r.total_sales).sum();
        prop_assert_eq!(by_year, direct);

        for t in &s.year_totals {
            let expected: u64 = records
                .iter()
                .filter(|r| r.car.year == t.year)
                .map(|r| r.total_sales)
                .sum();
            prop_assert_eq!(t.total_sales, expected);
        }
    }

    #[test]
    fn top_year_is_first_seen_maximum(records in arb_records()) {
        let s = aggregate(&records).unwrap();
        let max = s.year_totals.iter().map(|t| t.total_sales).max().unwrap();
        prop_assert_eq!(s.top_year.total_sales, max);

        // First-seen order of years in the input.
        let mut seen: Vec<u32> = Vec::new();
        for r in &records {
            if !seen.contains(&r.car.year) {
                seen.push(r.car.year);
            }
        }
        let order: Vec<u32> = s.year_totals.iter().map(|t| t.year).collect();
        prop_assert_eq!(&order, &seen);

        let first = s.year_totals.iter().find(|t| t.total_sales == max).unwrap();
        prop_assert_eq!(s.top_year.year, first.year);
    }

    #[test]
    fn aggregation_is_idempotent(records in arb_records()) {
        let snapshot = records.clone();
        let a = aggregate(&records).unwrap();
        let b = aggregate(&records).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(records, snapshot);
    }

    #[test]
    fn any_bad_price_aborts(records in arb_records(), idx in any::<prop::sample::Index>()) {
        let mut records = records;
        let i = idx.index(records.len());
        let bare = records[i].price.trim_start_matches('$').to_string();
        records[i].price = bare;
        let is_malformed = matches!(aggregate(&records), Err(SalesError::MalformedPrice { .. }));
        prop_assert!(is_malformed);
    }
}
