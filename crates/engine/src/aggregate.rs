use rustc_hash::FxHashMap;

use crate::error::SalesError;
use crate::model::SalesRecord;
use crate::money::Money;
use crate::summary::{RevenueWinner, Summary, YearTotal};

/// Scan the records once and pick the winners.
///
/// Winners start absent and are only replaced on a strictly greater value, so
/// the first record reaching a maximum keeps it. Year totals keep first-seen
/// order and the top year is the first year reaching the maximal total.
/// Any invalid record, malformed price or overflowing total aborts the whole
/// pass.
pub fn aggregate(records: &[SalesRecord]) -> Result<Summary, SalesError> {
    let mut top_revenue: Option<(&SalesRecord, Money)> = None;
    let mut top_sales: Option<&SalesRecord> = None;
    let mut year_totals: Vec<YearTotal> = Vec::new();
    let mut year_slot: FxHashMap<u32, usize> = FxHashMap::default();

    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
        let price = Money::parse_price(&record.price).map_err(|reason| SalesError::MalformedPrice {
            record_id: record.id.to_string(),
            value: record.price.clone(),
            reason,
        })?;
        let revenue = price
            .checked_mul(record.total_sales)
            .ok_or_else(|| SalesError::RevenueOverflow { record_id: record.id.to_string() })?;

        if top_revenue.map_or(true, |(_, best)| revenue > best) {
            top_revenue = Some((record, revenue));
        }
        if top_sales.map_or(true, |best| record.total_sales > best.total_sales) {
            top_sales = Some(record);
        }

        let slot = *year_slot.entry(record.car.year).or_insert_with(|| {
            year_totals.push(YearTotal { year: record.car.year, total_sales: 0 });
            year_totals.len() - 1
        });
        let year_total = &mut year_totals[slot];
        year_total.total_sales = year_total
            .total_sales
            .checked_add(record.total_sales)
            .ok_or(SalesError::SalesOverflow { year: record.car.year })?;
    }

    let (Some((revenue_record, revenue)), Some(sales_record)) = (top_revenue, top_sales) else {
        return Err(SalesError::EmptyInput);
    };

    let mut top_year = year_totals[0];
    for total in &year_totals[1..] {
        if total.total_sales > top_year.total_sales {
            top_year = *total;
        }
    }

    Ok(Summary {
        top_revenue: RevenueWinner { record: revenue_record.clone(), revenue },
        top_sales: sales_record.clone(),
        top_year,
        year_totals,
        record_count: records.len(),
    })
}
