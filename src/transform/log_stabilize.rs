//! Reversible log transform for the real-price series.
//!
//! Applied only to the real-price series, never to CPI, which is forecast on
//! its natural scale. The epsilon offset keeps `log(0)` finite and the
//! inverse clamp keeps recovered prices non-negative.

/// `ln(max(v, 0) + eps)`.
pub fn to_log(value: f64, eps: f64) -> f64 {
    (value.max(0.0) + eps).ln()
}

/// `max(exp(y) - eps, 0)`. Inverse of [`to_log`] for `v >= 0`.
pub fn from_log(log_value: f64, eps: f64) -> f64 {
    (log_value.exp() - eps).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_recovers_non_negative_values() {
        for &v in &[0.0, 1e-6, 0.5, 1.0, 100.0, 12345.678] {
            assert_relative_eq!(from_log(to_log(v, 1e-4), 1e-4), v, epsilon = 1e-9);
        }
    }

    #[test]
    fn negative_input_is_clamped_before_the_log() {
        assert_eq!(to_log(-3.0, 1e-4), to_log(0.0, 1e-4));
    }

    #[test]
    fn inverse_never_goes_negative() {
        // exp of a very negative value is below eps, so the clamp engages.
        assert_eq!(from_log(-100.0, 1e-4), 0.0);
    }
}
