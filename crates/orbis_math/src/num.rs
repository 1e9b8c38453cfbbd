//! Numbers and numerics.

#![allow(clippy::excessive_precision)]

use num_traits as nt;

/// The floating point type used for all vector, matrix and quaternion
/// components. Enabling the `f64` feature switches it to double precision.
#[cfg(not(feature = "f64"))]
pub type Real = f32;

/// The floating point type used for all vector, matrix and quaternion
/// components. Enabling the `f64` feature switches it to double precision.
#[cfg(feature = "f64")]
pub type Real = f64;

/// Default absolute tolerance for approximate comparisons of [`Real`] values.
#[cfg(not(feature = "f64"))]
pub const DEFAULT_TOLERANCE: Real = 1e-5;

/// Default absolute tolerance for approximate comparisons of [`Real`] values.
#[cfg(feature = "f64")]
pub const DEFAULT_TOLERANCE: Real = 1e-10;

/// Gathers traits useful for working with generic floating point types.
pub trait Float:
    nt::Float + nt::FromPrimitive + nt::ToPrimitive + approx::AbsDiffEq + approx::RelativeEq
{
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const TWO: Self;
    const FOUR: Self;
    const ONE_HALF: Self;
    const ONE_FOURTH: Self;
    const SQRT_2: Self;
    const FRAC_1_SQRT_2: Self;
    const PI: Self;
    const TWO_PI: Self;
    const FRAC_PI_2: Self;
    const FRAC_PI_4: Self;
    const FRAC_1_PI: Self;
    const DEGREES_PER_RADIAN: Self;
    const RADIANS_PER_DEGREE: Self;
}

macro_rules! impl_float {
    ($f:tt) => {
        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const FOUR: Self = 4.0;
            const ONE_HALF: Self = 0.5;
            const ONE_FOURTH: Self = 0.25;
            const SQRT_2: Self = std::$f::consts::SQRT_2;
            const FRAC_1_SQRT_2: Self = std::$f::consts::FRAC_1_SQRT_2;
            const PI: Self = std::$f::consts::PI;
            const TWO_PI: Self = 2.0 * std::$f::consts::PI;
            const FRAC_PI_2: Self = std::$f::consts::FRAC_PI_2;
            const FRAC_PI_4: Self = std::$f::consts::FRAC_PI_4;
            const FRAC_1_PI: Self = std::$f::consts::FRAC_1_PI;
            const DEGREES_PER_RADIAN: Self = 180.0 * std::$f::consts::FRAC_1_PI;
            const RADIANS_PER_DEGREE: Self = std::$f::consts::PI / 180.0;
        }
    };
}

impl_float!(f32);
impl_float!(f64);

/// Whether the given value lies within `tolerance` of zero.
#[inline]
pub fn is_near_zero(value: Real, tolerance: Real) -> bool {
    value.abs() <= tolerance
}
