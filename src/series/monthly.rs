//! Collapses raw per-order price observations into one monthly average.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::{month_floor, MonthlyPricePoint, PriceObservation};

/// Group observations by calendar month and average the unit price.
///
/// Input is expected to be pre-filtered to one part code and (optionally)
/// one currency; this stage only groups and averages. Output is sorted
/// ascending by month with exactly one point per distinct month. Empty input
/// yields an empty series; minimum-history enforcement belongs to the
/// orchestrator, not here.
pub fn build_monthly_avg_price(lines: &[PriceObservation]) -> Vec<MonthlyPricePoint> {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for line in lines {
        let month = month_floor(line.order_date);
        let entry = groups.entry(month).or_insert((0.0, 0));
        entry.0 += line.price_per_unit;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(month, (sum, count))| MonthlyPricePoint {
            month,
            avg_nominal_price: sum / count as f64,
        })
        .collect()
}
