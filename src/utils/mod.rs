//! Statistical utility functions.

pub mod stats;

pub use stats::{mean, quantile_normal, std_dev};
