//! Delimited-text sources over the fixed export layouts.
//!
//! Row-level problems (short rows, unparsable dates or prices) skip the row
//! rather than failing the whole read; only failing to open or read the file
//! itself is a repository error. Files are opened per call and closed when
//! the reader drops.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::ReaderBuilder;

use crate::core::{month_floor, CpiObservation, PriceObservation};
use crate::error::{ForecastError, Result};
use crate::repository::{CpiSource, PurchaseOrderSource};

// Purchase-order export column layout.
const PO_COL_ORDER_DATE: usize = 1;
const PO_COL_PART_CODE: usize = 4;
const PO_COL_PRICE_PER_UNIT: usize = 7;
const PO_COL_CURRENCY_CODE: usize = 9;

// CPI export layout (e.g. FRED CPIAUCSL): observation_date, value.
const CPI_COL_DATE: usize = 0;
const CPI_COL_VALUE: usize = 1;

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn open_error(path: &Path, err: &csv::Error) -> ForecastError {
    ForecastError::Repository(format!("failed to read '{}': {err}", path.display()))
}

/// Purchase-order source over a comma-delimited export file.
#[derive(Debug, Clone)]
pub struct CsvPurchaseOrderSource {
    path: PathBuf,
}

impl CsvPurchaseOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PurchaseOrderSource for CsvPurchaseOrderSource {
    fn lines(&self, part_code: &str, currency_code: Option<&str>) -> Result<Vec<PriceObservation>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| open_error(&self.path, &e))?;

        let mut lines = Vec::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record.map_err(|e| open_error(&self.path, &e))?;

            let parsed = (|| {
                let order_date = parse_date(record.get(PO_COL_ORDER_DATE)?)?;
                let part = record.get(PO_COL_PART_CODE)?.trim();
                let price = parse_price(record.get(PO_COL_PRICE_PER_UNIT)?)?;
                let currency = record.get(PO_COL_CURRENCY_CODE)?.trim();
                Some((order_date, part.to_string(), price, currency.to_string()))
            })();

            let Some((order_date, part, price, currency)) = parsed else {
                skipped += 1;
                continue;
            };

            if !part.eq_ignore_ascii_case(part_code) {
                continue;
            }
            if let Some(wanted) = currency_code {
                if !currency.eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }

            lines.push(PriceObservation {
                order_date,
                part_code: part,
                currency_code: currency,
                price_per_unit: price,
            });
        }

        if skipped > 0 {
            tracing::debug!(
                path = %self.path.display(),
                skipped,
                "skipped malformed purchase-order rows"
            );
        }

        Ok(lines)
    }
}

/// CPI source over a two-column delimited file.
#[derive(Debug, Clone)]
pub struct CsvCpiSource {
    path: PathBuf,
}

impl CsvCpiSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CpiSource for CsvCpiSource {
    fn monthly_cpi(&self) -> Result<Vec<CpiObservation>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| open_error(&self.path, &e))?;

        let mut observations = Vec::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record.map_err(|e| open_error(&self.path, &e))?;

            let parsed = (|| {
                let date = parse_date(record.get(CPI_COL_DATE)?)?;
                let value = parse_price(record.get(CPI_COL_VALUE)?)?;
                Some((date, value))
            })();

            match parsed {
                Some((date, value)) => observations.push(CpiObservation {
                    month: month_floor(date),
                    cpi_value: value,
                }),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(
                path = %self.path.display(),
                skipped,
                "skipped malformed CPI rows"
            );
        }

        Ok(observations)
    }
}
