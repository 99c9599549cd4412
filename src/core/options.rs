//! Per-call forecast configuration.

use serde::{Deserialize, Serialize};

/// Options controlling a single forecast call. Immutable once passed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastOptions {
    /// Forecast the real-price series in log space.
    ///
    /// Price series are strictly positive and grow multiplicatively; the log
    /// transform linearizes that growth and its inverse keeps the forecast
    /// non-negative. CPI is always forecast on its natural scale.
    pub use_log_transform: bool,
    /// Small positive offset so `log(0)` stays finite.
    pub log_epsilon: f64,
    /// Minimum number of monthly points required, both before and after the
    /// CPI join.
    pub min_monthly_points: usize,
    /// Two-sided confidence level for the forecast band, in (0, 1).
    pub confidence_level: f64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            use_log_transform: true,
            log_epsilon: 1e-4,
            min_monthly_points: 24,
            confidence_level: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ForecastOptions::default();
        assert!(opts.use_log_transform);
        assert_eq!(opts.log_epsilon, 1e-4);
        assert_eq!(opts.min_monthly_points, 24);
        assert_eq!(opts.confidence_level, 0.95);
    }
}
