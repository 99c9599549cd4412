//! Forecast output types: points, diagnostics, and the assembled result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Decomposition geometry actually used for one SSA sub-forecast.
///
/// Recorded so a forecast can be reproduced and audited: identical inputs
/// always produce identical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpectralParams {
    /// Full length of the training series.
    pub train_size: usize,
    /// Embedding window length for the trajectory matrix.
    pub window_size: usize,
    /// Length of the working sub-series that entered the decomposition.
    pub series_length: usize,
    /// Number of forecast steps produced.
    pub horizon: usize,
}

/// One forecast month. Nominal values are clamped to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: NaiveDate,
    /// Forecast in base-month (real) dollars.
    pub real_forecast: f64,
    /// Forecast re-inflated to nominal dollars via the CPI path.
    pub nominal_forecast: f64,
    /// Forecast CPI for this month.
    pub cpi_forecast: f64,
    pub lower_nominal: f64,
    pub upper_nominal: f64,
}

/// Coverage and model diagnostics for one forecast call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastDiagnostics {
    pub first_po_month: Option<NaiveDate>,
    pub last_po_month: Option<NaiveDate>,
    pub first_cpi_month: Option<NaiveDate>,
    pub last_cpi_month: Option<NaiveDate>,
    pub first_aligned_month: Option<NaiveDate>,
    pub last_aligned_month: Option<NaiveDate>,

    /// Monthly price points before the CPI join.
    pub monthly_points_before_join: usize,
    /// Monthly points that survived the CPI join and trained the model.
    pub monthly_points_used: usize,
    /// Months dropped because no CPI reading covered them.
    pub months_dropped_missing_cpi: usize,

    /// CPI of the last aligned month; the anchor for real/nominal conversion.
    pub base_cpi: f64,
    pub price_ssa: SpectralParams,
    pub cpi_ssa: SpectralParams,
}

/// The complete outcome of one forecast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub part_code: String,
    /// Month of the last aligned observation; forecast months start one
    /// month after this and run contiguously for the requested horizon.
    pub last_training_month: NaiveDate,
    pub points: Vec<ForecastPoint>,
    pub diagnostics: ForecastDiagnostics,
}
