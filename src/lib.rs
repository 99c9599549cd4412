//! # po-forecast
//!
//! Forecasts a part's future nominal purchase price from purchase-order
//! history and a consumer price index (CPI) series.
//!
//! The pipeline deflates nominal prices into inflation-adjusted ("real")
//! dollars anchored to the most recent CPI, forecasts the real-price and CPI
//! series independently with a singular-spectrum (SSA) forecaster, and
//! re-inflates the result back to nominal dollars with confidence bounds.
//!
//! Data flows strictly forward:
//!
//! ```text
//! raw PO lines -> monthly averages -> CPI join -> real series
//!              -> (optional log) -> SSA forecast -> re-inflate -> nominal
//! ```
//!
//! [`service::PriceForecastService`] sequences the whole pipeline over a pair
//! of [`repository`] sources; the individual stages are usable on their own
//! for embedders that bring their own data.

pub mod core;
pub mod error;
pub mod models;
pub mod repository;
pub mod series;
pub mod service;
pub mod transform;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{
        AlignedPoint, CpiObservation, ForecastOptions, ForecastPoint, ForecastResult,
        MonthlyPricePoint, PriceObservation, SpectralParams,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::SpectralForecaster;
    pub use crate::repository::{CpiSource, PurchaseOrderSource};
    pub use crate::service::PriceForecastService;
}
