//! Vec-backed sources for tests and embedders that already hold the data.

use crate::core::{CpiObservation, PriceObservation};
use crate::error::Result;
use crate::repository::{CpiSource, PurchaseOrderSource};

/// Purchase-order source over an in-memory list of lines.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPurchaseOrderSource {
    lines: Vec<PriceObservation>,
}

impl InMemoryPurchaseOrderSource {
    pub fn new(lines: Vec<PriceObservation>) -> Self {
        Self { lines }
    }
}

impl PurchaseOrderSource for InMemoryPurchaseOrderSource {
    fn lines(&self, part_code: &str, currency_code: Option<&str>) -> Result<Vec<PriceObservation>> {
        Ok(self
            .lines
            .iter()
            .filter(|line| line.part_code.eq_ignore_ascii_case(part_code))
            .filter(|line| match currency_code {
                Some(currency) => line.currency_code.eq_ignore_ascii_case(currency),
                None => true,
            })
            .cloned()
            .collect())
    }
}

/// CPI source over an in-memory list of observations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCpiSource {
    observations: Vec<CpiObservation>,
}

impl InMemoryCpiSource {
    pub fn new(observations: Vec<CpiObservation>) -> Self {
        Self { observations }
    }
}

impl CpiSource for InMemoryCpiSource {
    fn monthly_cpi(&self) -> Result<Vec<CpiObservation>> {
        Ok(self.observations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(part: &str, currency: &str) -> PriceObservation {
        PriceObservation {
            order_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            part_code: part.to_string(),
            currency_code: currency.to_string(),
            price_per_unit: 10.0,
        }
    }

    #[test]
    fn part_code_match_is_case_insensitive() {
        let source = InMemoryPurchaseOrderSource::new(vec![obs("ab-100", "USD")]);

        let lines = source.lines("AB-100", None).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn currency_filter_is_optional_and_case_insensitive() {
        let source =
            InMemoryPurchaseOrderSource::new(vec![obs("AB-100", "usd"), obs("AB-100", "EUR")]);

        assert_eq!(source.lines("AB-100", None).unwrap().len(), 2);
        assert_eq!(source.lines("AB-100", Some("USD")).unwrap().len(), 1);
    }

    #[test]
    fn unknown_part_yields_empty_not_error() {
        let source = InMemoryPurchaseOrderSource::new(vec![obs("AB-100", "USD")]);
        assert!(source.lines("ZZ-999", None).unwrap().is_empty());
    }
}
