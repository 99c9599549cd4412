//! Monthly series construction: aggregation and CPI alignment.

mod align;
mod monthly;

pub use align::{align_with_cpi, build_cpi_map, AlignOutcome};
pub use monthly::build_monthly_avg_price;
