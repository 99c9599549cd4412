//! Core data model shared by every pipeline stage.

mod month;
mod observation;
mod options;
mod result;

pub use month::{add_months, month_floor, months_between};
pub use observation::{AlignedPoint, CpiObservation, MonthlyPricePoint, PriceObservation};
pub use options::ForecastOptions;
pub use result::{ForecastDiagnostics, ForecastPoint, ForecastResult, SpectralParams};
