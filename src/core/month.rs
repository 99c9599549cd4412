//! Calendar-month arithmetic on first-of-month keys.
//!
//! Every series in this crate is keyed by the first day of a calendar month;
//! these helpers keep that normalization in one place.

use chrono::{Datelike, Months, NaiveDate};

/// Normalize any date to the first day of its calendar month.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists for a valid (year, month).
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Add `n` calendar months to a first-of-month key.
pub fn add_months(month: NaiveDate, n: u32) -> NaiveDate {
    month + Months::new(n)
}

/// Signed number of whole calendar months from `from` to `to`.
///
/// Callers running the probe-then-slice discovery protocol use this to turn
/// a discovered `last_training_month` into a horizon measured from "now":
/// `gap = months_between(last_training_month, current_month).max(0)`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}
