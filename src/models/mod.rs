//! Forecasting models.

pub mod ssa;

pub use ssa::{SpectralForecast, SpectralForecaster};
