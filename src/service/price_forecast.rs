//! The forecast pipeline, end to end.

use tracing::debug;

use crate::core::{
    add_months, AlignedPoint, ForecastDiagnostics, ForecastOptions, ForecastPoint, ForecastResult,
    MonthlyPricePoint,
};
use crate::error::{ForecastError, Result};
use crate::models::{SpectralForecast, SpectralForecaster};
use crate::repository::{CpiSource, PurchaseOrderSource};
use crate::series::{align_with_cpi, build_cpi_map, build_monthly_avg_price};
use crate::transform::{from_log, to_log, to_nominal, to_real};

/// Forecasts a part's nominal purchase price over the next months.
///
/// Each call is a pure function of the source data and options: no cache, no
/// shared state between calls, so concurrent forecasts need no coordination.
/// The same [`SpectralForecaster`] instance serves both the real-price and
/// the CPI sub-forecast.
pub struct PriceForecastService<P, C> {
    po_source: P,
    cpi_source: C,
    forecaster: SpectralForecaster,
}

impl<P: PurchaseOrderSource, C: CpiSource> PriceForecastService<P, C> {
    pub fn new(po_source: P, cpi_source: C) -> Self {
        Self {
            po_source,
            cpi_source,
            forecaster: SpectralForecaster::new(),
        }
    }

    /// Replace the default forecaster, e.g. to tune the rank threshold.
    pub fn with_forecaster(po_source: P, cpi_source: C, forecaster: SpectralForecaster) -> Self {
        Self {
            po_source,
            cpi_source,
            forecaster,
        }
    }

    /// The raw monthly average-price history for a part, for display next to
    /// a forecast ("previous purchase prices").
    pub fn monthly_history(
        &self,
        part_code: &str,
        currency_code: Option<&str>,
    ) -> Result<Vec<MonthlyPricePoint>> {
        let lines = self.po_source.lines(part_code, currency_code)?;
        Ok(build_monthly_avg_price(&lines))
    }

    /// Forecast the nominal price for `months` steps past the last aligned
    /// training month.
    ///
    /// The horizon is measured from the data's last training month, not from
    /// the calendar; callers wanting "N months from now" probe with a
    /// 1-month call, compute the gap with
    /// [`months_between`](crate::core::months_between), and re-issue. That
    /// works because identical inputs always produce identical forecasts and
    /// a longer horizon never changes earlier steps.
    pub fn forecast_nominal_price(
        &self,
        part_code: &str,
        months: usize,
        currency_code: Option<&str>,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        validate(part_code, months, options)?;

        // Load and aggregate the price history.
        let po_lines = self.po_source.lines(part_code, currency_code)?;
        let monthly = build_monthly_avg_price(&po_lines);
        debug!(
            part_code,
            po_lines = po_lines.len(),
            monthly_points = monthly.len(),
            "aggregated purchase-order history"
        );

        if monthly.len() < options.min_monthly_points {
            return Err(ForecastError::InsufficientHistory {
                part_code: part_code.to_string(),
                needed: options.min_monthly_points,
                got: monthly.len(),
            });
        }

        // Join against CPI coverage.
        let cpi_map = build_cpi_map(&self.cpi_source.monthly_cpi()?);
        let outcome = align_with_cpi(&monthly, &cpi_map);
        debug!(
            part_code,
            aligned = outcome.aligned.len(),
            dropped = outcome.dropped_missing_cpi,
            "aligned monthly prices with CPI"
        );

        if outcome.aligned.len() < options.min_monthly_points {
            return Err(ForecastError::InsufficientAlignedHistory {
                part_code: part_code.to_string(),
                needed: options.min_monthly_points,
                got: outcome.aligned.len(),
            });
        }

        let aligned = &outcome.aligned;
        let last = aligned[aligned.len() - 1];
        let last_training_month = last.month;
        // Anchor every conversion to the most recent observed CPI.
        let base_cpi = last.cpi_value;

        // Deflate into real dollars, optionally stabilized in log space.
        let real_series: Vec<f64> = aligned
            .iter()
            .map(|p| to_real(p.nominal_price, p.cpi_value, base_cpi))
            .collect();
        let training_series: Vec<f64> = if options.use_log_transform {
            real_series
                .iter()
                .map(|&v| to_log(v, options.log_epsilon))
                .collect()
        } else {
            real_series
        };

        // Dual forecast: real price (possibly in log space) and CPI on its
        // natural scale, both through the same decomposition.
        let price = self
            .forecaster
            .forecast(&training_series, months, options.confidence_level)?;
        let cpi_series: Vec<f64> = aligned.iter().map(|p| p.cpi_value).collect();
        let cpi = self
            .forecaster
            .forecast(&cpi_series, months, options.confidence_level)?;

        let (real_point, real_lower, real_upper) = if options.use_log_transform {
            (
                unlog(&price.point, options.log_epsilon),
                unlog(&price.lower, options.log_epsilon),
                unlog(&price.upper, options.log_epsilon),
            )
        } else {
            (price.point.clone(), price.lower.clone(), price.upper.clone())
        };

        // Re-inflate along the forecast CPI path and clamp to non-negative.
        let points: Vec<ForecastPoint> = (0..months)
            .map(|i| {
                let month = add_months(last_training_month, (i + 1) as u32);
                let cpi_forecast = cpi.point[i];
                ForecastPoint {
                    month,
                    real_forecast: real_point[i],
                    nominal_forecast: to_nominal(real_point[i], cpi_forecast, base_cpi).max(0.0),
                    cpi_forecast,
                    lower_nominal: to_nominal(real_lower[i], cpi_forecast, base_cpi).max(0.0),
                    upper_nominal: to_nominal(real_upper[i], cpi_forecast, base_cpi).max(0.0),
                }
            })
            .collect();

        let diagnostics = build_diagnostics(&monthly, &cpi_map, aligned, &outcome, base_cpi, &price, &cpi);

        debug!(
            part_code,
            %last_training_month,
            horizon = months,
            "forecast assembled"
        );

        Ok(ForecastResult {
            part_code: part_code.to_string(),
            last_training_month,
            points,
            diagnostics,
        })
    }
}

fn validate(part_code: &str, months: usize, options: &ForecastOptions) -> Result<()> {
    if part_code.trim().is_empty() {
        return Err(ForecastError::InvalidArgument(
            "part code must not be empty".to_string(),
        ));
    }
    if months == 0 {
        return Err(ForecastError::InvalidArgument(
            "months must be positive".to_string(),
        ));
    }
    if !(options.confidence_level > 0.0 && options.confidence_level < 1.0) {
        return Err(ForecastError::InvalidArgument(format!(
            "confidence level must be in (0, 1), got {}",
            options.confidence_level
        )));
    }
    if options.log_epsilon <= 0.0 {
        return Err(ForecastError::InvalidArgument(format!(
            "log epsilon must be positive, got {}",
            options.log_epsilon
        )));
    }
    if options.min_monthly_points == 0 {
        return Err(ForecastError::InvalidArgument(
            "minimum monthly points must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn unlog(values: &[f64], eps: f64) -> Vec<f64> {
    values.iter().map(|&v| from_log(v, eps)).collect()
}

fn build_diagnostics(
    monthly: &[MonthlyPricePoint],
    cpi_map: &std::collections::BTreeMap<chrono::NaiveDate, f64>,
    aligned: &[AlignedPoint],
    outcome: &crate::series::AlignOutcome,
    base_cpi: f64,
    price: &SpectralForecast,
    cpi: &SpectralForecast,
) -> ForecastDiagnostics {
    ForecastDiagnostics {
        first_po_month: monthly.first().map(|p| p.month),
        last_po_month: monthly.last().map(|p| p.month),
        first_cpi_month: cpi_map.keys().next().copied(),
        last_cpi_month: cpi_map.keys().next_back().copied(),
        first_aligned_month: aligned.first().map(|p| p.month),
        last_aligned_month: aligned.last().map(|p| p.month),
        monthly_points_before_join: monthly.len(),
        monthly_points_used: aligned.len(),
        months_dropped_missing_cpi: outcome.dropped_missing_cpi,
        base_cpi,
        price_ssa: price.params,
        cpi_ssa: cpi.params,
    }
}
