//! Raw observations and the monthly series derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One purchase-order line, as supplied by a purchase-order source.
///
/// Immutable; the pipeline never mutates observations, it only derives
/// monthly series from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub order_date: NaiveDate,
    pub part_code: String,
    pub currency_code: String,
    pub price_per_unit: f64,
}

/// One monthly CPI reading, keyed by the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpiObservation {
    pub month: NaiveDate,
    pub cpi_value: f64,
}

/// Average nominal price for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPricePoint {
    pub month: NaiveDate,
    pub avg_nominal_price: f64,
}

/// A monthly price point joined with its CPI reading.
///
/// Produced by the CPI aligner in ascending month order; that ordering
/// determines the last training month and the recurrence structure the
/// forecaster consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub month: NaiveDate,
    pub nominal_price: f64,
    pub cpi_value: f64,
}
