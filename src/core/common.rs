// location for defining helpers shared across the calculators

use crate::errors::ValidationError;

/// Reject NaN and infinite values before they can reach any arithmetic.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_pass_through_finite_values() {
        assert_eq!(ensure_finite("floor_area", 12.5), Ok(12.5));
        assert_eq!(ensure_finite("design_temp", -30.), Ok(-30.));
    }

    #[rstest]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn should_reject_infinite_values(#[case] value: f64) {
        assert_eq!(
            ensure_finite("floor_area", value),
            Err(ValidationError::NotFinite {
                field: "floor_area",
                value
            })
        );
    }

    #[rstest]
    fn should_reject_nan() {
        assert!(matches!(
            ensure_finite("electricity_rate", f64::NAN),
            Err(ValidationError::NotFinite {
                field: "electricity_rate",
                ..
            })
        ));
    }
}
