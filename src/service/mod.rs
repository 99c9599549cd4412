//! Forecast orchestration: load, aggregate, align, deflate, forecast,
//! re-inflate.

mod price_forecast;

pub use price_forecast::PriceForecastService;
