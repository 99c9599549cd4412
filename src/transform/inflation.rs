//! Nominal <-> real price conversion anchored to a base month's CPI.
//!
//! Both functions are total: a non-positive CPI disables the conversion and
//! passes the value through unchanged rather than dividing by zero.

/// Convert a nominal price to base-month ("real") dollars.
///
/// `real = nominal * (base_cpi / month_cpi)` when `month_cpi > 0`,
/// otherwise `nominal` unchanged.
pub fn to_real(nominal: f64, month_cpi: f64, base_cpi: f64) -> f64 {
    if month_cpi <= 0.0 {
        nominal
    } else {
        nominal * (base_cpi / month_cpi)
    }
}

/// Convert a real price back to nominal dollars.
///
/// `nominal = real * (month_cpi / base_cpi)` when `base_cpi > 0`,
/// otherwise `real` unchanged. Inverse of [`to_real`] whenever both CPI
/// values are positive.
pub fn to_nominal(real: f64, month_cpi: f64, base_cpi: f64) -> f64 {
    if base_cpi <= 0.0 {
        real
    } else {
        real * (month_cpi / base_cpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn deflates_against_the_base_month() {
        // A month with lower CPI than base gets scaled up in real terms.
        assert_relative_eq!(to_real(100.0, 250.0, 300.0), 120.0);
        // The base month itself is unchanged.
        assert_relative_eq!(to_real(100.0, 300.0, 300.0), 100.0);
    }

    #[test]
    fn reinflates_with_the_month_cpi() {
        assert_relative_eq!(to_nominal(120.0, 250.0, 300.0), 100.0);
    }

    #[test]
    fn round_trip_is_identity_for_positive_cpi() {
        for &nominal in &[0.0, 0.01, 42.5, 100.0, 9999.75] {
            for &(month_cpi, base_cpi) in &[(250.0, 300.0), (300.0, 300.0), (310.2, 287.9)] {
                let real = to_real(nominal, month_cpi, base_cpi);
                assert_relative_eq!(
                    to_nominal(real, month_cpi, base_cpi),
                    nominal,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn non_positive_cpi_passes_through() {
        assert_eq!(to_real(100.0, 0.0, 300.0), 100.0);
        assert_eq!(to_real(100.0, -1.0, 300.0), 100.0);
        assert_eq!(to_nominal(100.0, 250.0, 0.0), 100.0);
        assert_eq!(to_nominal(100.0, 250.0, -5.0), 100.0);
    }
}
