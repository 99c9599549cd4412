//! End-to-end pipeline test: CSV files in, nominal forecast out.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use po_forecast::core::{add_months, ForecastOptions};
use po_forecast::repository::{CsvCpiSource, CsvPurchaseOrderSource};
use po_forecast::service::PriceForecastService;

fn month(offset: u32) -> NaiveDate {
    add_months(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), offset)
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "po_forecast_it_{name}_{}",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// 30 months of slightly drifting prices for AB-100 plus noise rows that the
/// part/currency filters must drop.
fn po_csv() -> String {
    let mut csv = String::from(
        "ID,ORDER_DATE,SUPPLIER,SITE,PART_CODE,DESC,QTY,PRICE_PER_UNIT,TOTAL,SYS_CURRENCY_CODE\n",
    );
    for i in 0..30u32 {
        let m = month(i);
        let price = 100.0 + 0.4 * i as f64;
        csv.push_str(&format!(
            "{i},{},ACME,MAIN,AB-100,bearing,2,{price:.2},0,USD\n",
            m.format("%Y-%m-%d")
        ));
        // Same month, different part and different currency.
        csv.push_str(&format!(
            "x{i},{},ACME,MAIN,ZZ-999,other,1,55.00,0,USD\n",
            m.format("%Y-%m-%d")
        ));
        csv.push_str(&format!(
            "e{i},{},ACME,MAIN,AB-100,bearing,1,90.00,0,EUR\n",
            m.format("%Y-%m-%d")
        ));
    }
    csv
}

fn cpi_csv(months: u32) -> String {
    let mut csv = String::from("observation_date,CPIAUCSL\n");
    for i in 0..months {
        csv.push_str(&format!(
            "{},{:.3}\n",
            month(i).format("%Y-%m-%d"),
            290.0 + 0.6 * i as f64
        ));
    }
    csv
}

#[test]
fn csv_sources_feed_a_complete_forecast() {
    let po_path = write_fixture("po", &po_csv());
    let cpi_path = write_fixture("cpi", &cpi_csv(30));

    let service = PriceForecastService::new(
        CsvPurchaseOrderSource::new(&po_path),
        CsvCpiSource::new(&cpi_path),
    );

    let result = service
        .forecast_nominal_price("ab-100", 6, Some("usd"), &ForecastOptions::default())
        .unwrap();

    std::fs::remove_file(&po_path).ok();
    std::fs::remove_file(&cpi_path).ok();

    assert_eq!(result.part_code, "ab-100");
    assert_eq!(result.last_training_month, month(29));
    assert_eq!(result.points.len(), 6);

    // EUR and ZZ-999 rows must not leak into the monthly average.
    assert_eq!(result.diagnostics.monthly_points_before_join, 30);
    assert_eq!(result.diagnostics.monthly_points_used, 30);
    assert_eq!(result.diagnostics.months_dropped_missing_cpi, 0);
    assert!((result.diagnostics.base_cpi - 307.4).abs() < 1e-9);

    for (i, point) in result.points.iter().enumerate() {
        assert_eq!(point.month, month(30 + i as u32));
        assert!(point.nominal_forecast.is_finite());
        assert!(point.nominal_forecast >= 0.0);
        assert!(point.lower_nominal <= point.nominal_forecast);
        assert!(point.upper_nominal >= point.nominal_forecast);
        // Prices drifted gently upward around ~112; the forecast should stay
        // in that neighborhood, not collapse or explode.
        assert!(point.nominal_forecast > 50.0 && point.nominal_forecast < 250.0);
    }
}

#[test]
fn partial_cpi_coverage_is_reported_then_exhausted() {
    let po_path = write_fixture("po_partial", &po_csv());

    // CPI for 28 of the 30 price months: forecast works, drops reported.
    let cpi_path = write_fixture("cpi_partial", &cpi_csv(28));
    let service = PriceForecastService::new(
        CsvPurchaseOrderSource::new(&po_path),
        CsvCpiSource::new(&cpi_path),
    );
    let result = service
        .forecast_nominal_price("AB-100", 3, Some("USD"), &ForecastOptions::default())
        .unwrap();
    std::fs::remove_file(&cpi_path).ok();

    assert_eq!(result.diagnostics.monthly_points_used, 28);
    assert_eq!(result.diagnostics.months_dropped_missing_cpi, 2);
    assert_eq!(result.last_training_month, month(27));

    // CPI for only 20 months: below the minimum after the join.
    let cpi_path = write_fixture("cpi_short", &cpi_csv(20));
    let service = PriceForecastService::new(
        CsvPurchaseOrderSource::new(&po_path),
        CsvCpiSource::new(&cpi_path),
    );
    let err = service
        .forecast_nominal_price("AB-100", 3, Some("USD"), &ForecastOptions::default())
        .unwrap_err();
    std::fs::remove_file(&cpi_path).ok();
    std::fs::remove_file(&po_path).ok();

    assert!(matches!(
        err,
        po_forecast::ForecastError::InsufficientAlignedHistory { got: 20, .. }
    ));
}
