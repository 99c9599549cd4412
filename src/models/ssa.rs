//! Singular-spectrum (SSA) forecaster.
//!
//! Decomposes a windowed trajectory matrix of the series via SVD, keeps the
//! leading components that carry the dominant trend and oscillatory
//! structure, reconstructs a smoothed series by diagonal averaging, and
//! extrapolates with the linear recurrence implied by the retained singular
//! vectors. Confidence bounds come from the in-sample reconstruction
//! residuals, scaled by the two-sided normal quantile, and are applied as a
//! flat band across the horizon.

use nalgebra::DMatrix;

use crate::core::SpectralParams;
use crate::error::{ForecastError, Result};
use crate::utils::{quantile_normal, std_dev};

/// Shortest series the embedding can handle; the orchestrator's
/// minimum-history gate is far above this.
const MIN_SERIES_LEN: usize = 4;

/// Retained singular directions whose tail weight reaches this close to 1
/// make the recurrence denominator blow up; fall back to a flat forecast.
const VERTICALITY_LIMIT: f64 = 1.0 - 1e-10;

/// Output of one SSA forecast: point path, flat confidence band, and the
/// decomposition geometry used.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralForecast {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub params: SpectralParams,
}

/// Reusable SSA forecaster.
///
/// Stateless between calls: the same instance serves both the price and the
/// CPI sub-forecast, guaranteeing identical decomposition behavior for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralForecaster {
    /// Fraction of squared-singular-value energy the retained components
    /// must cover.
    energy_threshold: f64,
}

impl Default for SpectralForecaster {
    fn default() -> Self {
        Self {
            energy_threshold: 0.90,
        }
    }
}

impl SpectralForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rank-selection energy threshold (must be in (0, 1]).
    pub fn with_energy_threshold(threshold: f64) -> Self {
        Self {
            energy_threshold: threshold.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    /// Forecast `horizon` steps ahead with a symmetric confidence band.
    ///
    /// The forecast is deterministic and extends monotonically: requesting a
    /// longer horizon never changes the values of earlier steps, which is
    /// what lets callers probe with a 1-month call and re-issue with a wider
    /// horizon.
    pub fn forecast(
        &self,
        series: &[f64],
        horizon: usize,
        confidence_level: f64,
    ) -> Result<SpectralForecast> {
        if horizon == 0 {
            return Err(ForecastError::InvalidArgument(
                "horizon must be positive".to_string(),
            ));
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ForecastError::InvalidArgument(format!(
                "confidence level must be in (0, 1), got {confidence_level}"
            )));
        }
        if series.len() < MIN_SERIES_LEN {
            return Err(ForecastError::InvalidArgument(format!(
                "series too short to embed: need at least {MIN_SERIES_LEN}, got {}",
                series.len()
            )));
        }

        let train_size = series.len();
        let window_size = (train_size / 6).clamp(4, 12);
        let series_length = train_size.min(window_size * 2);

        // Only the most recent `series_length` observations enter the model.
        let sub = &series[train_size - series_length..];

        let (reconstructed, recurrence) = self.decompose(sub, window_size);

        let point = extrapolate(&reconstructed, recurrence.as_deref(), window_size, horizon);

        // Flat band from in-sample reconstruction error.
        let residuals: Vec<f64> = sub
            .iter()
            .zip(reconstructed.iter())
            .map(|(actual, fitted)| actual - fitted)
            .collect();
        let sigma = std_dev(&residuals);
        let z = quantile_normal((1.0 + confidence_level) / 2.0);
        let half_width = if sigma > 0.0 && z.is_finite() {
            z * sigma
        } else {
            0.0
        };

        let lower: Vec<f64> = point.iter().map(|p| p - half_width).collect();
        let upper: Vec<f64> = point.iter().map(|p| p + half_width).collect();

        Ok(SpectralForecast {
            point,
            lower,
            upper,
            params: SpectralParams {
                train_size,
                window_size,
                series_length,
                horizon,
            },
        })
    }

    /// Embed, decompose, reconstruct. Returns the smoothed sub-series and
    /// the recurrence coefficients (oldest lag first), or `None` when the
    /// retained components are too vertical to extrapolate.
    fn decompose(&self, sub: &[f64], window_size: usize) -> (Vec<f64>, Option<Vec<f64>>) {
        let n = sub.len();
        let l = window_size.min(n);
        let k = n - l + 1;

        // Trajectory matrix: column j is the window starting at offset j.
        let trajectory = DMatrix::from_fn(l, k, |i, j| sub[j + i]);

        let svd = trajectory.svd(true, true);
        let (u, v_t) = match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => (u, v_t),
            // SVD of a finite matrix always converges; treat a refusal as a
            // degenerate series and pass it through unsmoothed.
            _ => return (sub.to_vec(), None),
        };
        let singular = &svd.singular_values;

        let rank = self.select_rank(singular.as_slice(), l);

        // Rank-reduced trajectory matrix.
        let mut approx = DMatrix::zeros(l, k);
        for idx in 0..rank {
            let outer = u.column(idx).clone_owned() * v_t.row(idx).clone_owned();
            approx += outer * singular[idx];
        }

        // Diagonal averaging back to a series.
        let mut sums = vec![0.0; n];
        let mut counts = vec![0usize; n];
        for i in 0..l {
            for j in 0..k {
                sums[i + j] += approx[(i, j)];
                counts[i + j] += 1;
            }
        }
        let reconstructed: Vec<f64> = sums
            .into_iter()
            .zip(counts)
            .map(|(s, c)| s / c as f64)
            .collect();

        // Linear recurrence from the retained left singular vectors: the
        // last window coordinate as a combination of the first l-1.
        let verticality: f64 = (0..rank).map(|idx| u[(l - 1, idx)].powi(2)).sum();
        if l < 2 || verticality >= VERTICALITY_LIMIT {
            return (reconstructed, None);
        }

        let scale = 1.0 / (1.0 - verticality);
        let coefficients: Vec<f64> = (0..l - 1)
            .map(|j| {
                scale
                    * (0..rank)
                        .map(|idx| u[(l - 1, idx)] * u[(j, idx)])
                        .sum::<f64>()
            })
            .collect();

        if coefficients.iter().any(|c| !c.is_finite()) {
            return (reconstructed, None);
        }

        (reconstructed, Some(coefficients))
    }

    /// Smallest leading rank whose squared singular values reach the energy
    /// threshold, always at least 1 and at most `window_size - 1` so the
    /// recurrence keeps a free coordinate.
    fn select_rank(&self, singular_values: &[f64], window_size: usize) -> usize {
        let total_energy: f64 = singular_values.iter().map(|s| s * s).sum();
        let cap = window_size.saturating_sub(1).max(1).min(singular_values.len());

        if total_energy <= 0.0 {
            return 1.min(cap);
        }

        let mut cumulative = 0.0;
        for (idx, s) in singular_values.iter().take(cap).enumerate() {
            cumulative += s * s;
            if cumulative / total_energy >= self.energy_threshold {
                return idx + 1;
            }
        }
        cap
    }
}

/// Apply the recurrence iteratively from the tail of the reconstruction.
///
/// Without usable coefficients the forecast degrades to repeating the last
/// reconstructed value, which keeps degenerate series finite.
fn extrapolate(
    reconstructed: &[f64],
    coefficients: Option<&[f64]>,
    window_size: usize,
    horizon: usize,
) -> Vec<f64> {
    let last = reconstructed.last().copied().unwrap_or(0.0);

    let coefficients = match coefficients {
        Some(c) if window_size >= 2 && reconstructed.len() >= window_size - 1 => c,
        _ => return vec![last; horizon],
    };

    // Chronological buffer of the previous window_size - 1 values.
    let mut buffer: Vec<f64> = reconstructed[reconstructed.len() - (window_size - 1)..].to_vec();
    let mut forecast = Vec::with_capacity(horizon);

    for _ in 0..horizon {
        let next: f64 = coefficients
            .iter()
            .zip(buffer.iter())
            .map(|(c, y)| c * y)
            .sum();

        if !next.is_finite() {
            // Numerical blow-up; freeze the path instead of emitting NaN.
            let frozen = forecast.last().copied().unwrap_or(last);
            while forecast.len() < horizon {
                forecast.push(frozen);
            }
            return forecast;
        }

        forecast.push(next);
        buffer.rotate_left(1);
        let tail = buffer.len() - 1;
        buffer[tail] = next;
    }

    forecast
}
