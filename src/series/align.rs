//! Inner join of the monthly price series against a month -> CPI map.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::{AlignedPoint, CpiObservation, MonthlyPricePoint};

/// Result of aligning a price series with the CPI map.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignOutcome {
    /// Joined points, ascending by month.
    pub aligned: Vec<AlignedPoint>,
    /// Price months that had no CPI reading and were dropped.
    pub dropped_missing_cpi: usize,
}

/// Collapse CPI observations into a month -> CPI lookup.
///
/// When two observations share a month the higher CPI value wins; the
/// tie-break is deterministic so repeated runs see the same map.
pub fn build_cpi_map(observations: &[CpiObservation]) -> BTreeMap<NaiveDate, f64> {
    let mut map: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for obs in observations {
        map.entry(obs.month)
            .and_modify(|v| {
                if obs.cpi_value > *v {
                    *v = obs.cpi_value;
                }
            })
            .or_insert(obs.cpi_value);
    }

    map
}

/// Inner-join a monthly price series against the CPI map by exact month.
///
/// Price-series order (ascending by month) is preserved. Unmatched months
/// are dropped silently here; the orchestrator surfaces the drop count as a
/// diagnostic and decides whether the remainder still meets its minimum.
pub fn align_with_cpi(
    monthly: &[MonthlyPricePoint],
    cpi_map: &BTreeMap<NaiveDate, f64>,
) -> AlignOutcome {
    let mut aligned = Vec::with_capacity(monthly.len());
    let mut dropped = 0usize;

    for point in monthly {
        match cpi_map.get(&point.month) {
            Some(&cpi) => aligned.push(AlignedPoint {
                month: point.month,
                nominal_price: point.avg_nominal_price,
                cpi_value: cpi,
            }),
            None => dropped += 1,
        }
    }

    AlignOutcome {
        aligned,
        dropped_missing_cpi: dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn cpi(y: i32, m: u32, value: f64) -> CpiObservation {
        CpiObservation {
            month: month(y, m),
            cpi_value: value,
        }
    }

    fn price(y: i32, m: u32, value: f64) -> MonthlyPricePoint {
        MonthlyPricePoint {
            month: month(y, m),
            avg_nominal_price: value,
        }
    }

    #[test]
    fn duplicate_months_keep_the_highest_cpi() {
        let map = build_cpi_map(&[cpi(2024, 1, 300.0), cpi(2024, 1, 305.0)]);
        assert_eq!(map[&month(2024, 1)], 305.0);

        // Order of arrival must not matter.
        let map = build_cpi_map(&[cpi(2024, 1, 305.0), cpi(2024, 1, 300.0)]);
        assert_eq!(map[&month(2024, 1)], 305.0);
    }

    #[test]
    fn join_keeps_matched_months_in_order() {
        let map = build_cpi_map(&[cpi(2024, 1, 300.0), cpi(2024, 2, 301.0)]);
        let monthly = vec![price(2024, 1, 10.0), price(2024, 2, 11.0)];

        let outcome = align_with_cpi(&monthly, &map);

        assert_eq!(outcome.dropped_missing_cpi, 0);
        assert_eq!(
            outcome.aligned,
            vec![
                AlignedPoint {
                    month: month(2024, 1),
                    nominal_price: 10.0,
                    cpi_value: 300.0,
                },
                AlignedPoint {
                    month: month(2024, 2),
                    nominal_price: 11.0,
                    cpi_value: 301.0,
                },
            ]
        );
    }

    #[test]
    fn unmatched_months_are_counted_not_errored() {
        // 30 price months, CPI covers only the first 28.
        let monthly: Vec<_> = (0..30)
            .map(|i| price(2020 + (i / 12) as i32, (i % 12) + 1, 10.0))
            .collect();
        let cpi_obs: Vec<_> = (0..28)
            .map(|i| cpi(2020 + (i / 12) as i32, (i % 12) + 1, 300.0))
            .collect();

        let outcome = align_with_cpi(&monthly, &build_cpi_map(&cpi_obs));

        assert_eq!(outcome.aligned.len(), 28);
        assert_eq!(outcome.dropped_missing_cpi, 2);
    }

    #[test]
    fn empty_cpi_map_drops_everything() {
        let monthly = vec![price(2024, 1, 10.0)];
        let outcome = align_with_cpi(&monthly, &BTreeMap::new());

        assert!(outcome.aligned.is_empty());
        assert_eq!(outcome.dropped_missing_cpi, 1);
    }
}
