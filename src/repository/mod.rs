//! Data sources backing the forecast pipeline.
//!
//! The pipeline depends only on the two capability traits here; concrete
//! backends (delimited files, in-memory fixtures, a relational store) are
//! interchangeable. Sources follow an open-read-close discipline: each call
//! acquires what it needs, returns owned data, and holds nothing between
//! calls.

mod csv_source;
mod memory;

pub use csv_source::{CsvCpiSource, CsvPurchaseOrderSource};
pub use memory::{InMemoryCpiSource, InMemoryPurchaseOrderSource};

use crate::core::{CpiObservation, PriceObservation};
use crate::error::Result;

/// Supplies purchase-order lines for one part.
///
/// Implementations must match `part_code` (and `currency_code`, when given)
/// case-insensitively. Output order is not required; the pipeline sorts and
/// groups itself.
pub trait PurchaseOrderSource {
    fn lines(&self, part_code: &str, currency_code: Option<&str>) -> Result<Vec<PriceObservation>>;
}

/// Supplies the full available monthly CPI history, in any order.
pub trait CpiSource {
    fn monthly_cpi(&self) -> Result<Vec<CpiObservation>>;
}
