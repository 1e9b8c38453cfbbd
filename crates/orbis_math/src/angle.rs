//! Conversion between radians and the configured angle unit.
//!
//! Every angle taken or returned by the library is a plain [`Real`] in the
//! process-wide [`AngleUnit`](crate::config::AngleUnit). Trigonometry is
//! always done in radians.

use crate::{config, num::Real};

/// Converts an angle value given in the configured unit to radians.
#[inline]
pub fn configured_to_radians(value: Real) -> Real {
    config::angle_unit().to_radians(value)
}

/// Converts an angle value in radians to the configured unit.
#[inline]
pub fn radians_to_configured(radians: Real) -> Real {
    config::angle_unit().from_radians(radians)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Float;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_unit_passes_radians_through() {
        assert_abs_diff_eq!(configured_to_radians(Real::FRAC_PI_2), Real::FRAC_PI_2);
        assert_abs_diff_eq!(radians_to_configured(-1.25), -1.25);
    }

    #[test]
    fn conversion_round_trips() {
        let value = 0.7;
        assert_abs_diff_eq!(
            radians_to_configured(configured_to_radians(value)),
            value,
            epsilon = 1e-6
        );
    }
}
