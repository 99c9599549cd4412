//! Reversible value transforms used around the forecaster.
//!
//! Inflation adjustment converts between nominal and base-month ("real")
//! dollars; log stabilization linearizes multiplicative growth before the
//! decomposition and restores the natural scale afterwards.

pub mod inflation;
pub mod log_stabilize;

pub use inflation::{to_nominal, to_real};
pub use log_stabilize::{from_log, to_log};
