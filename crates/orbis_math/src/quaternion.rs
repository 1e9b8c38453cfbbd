//! Quaternions.

use crate::{
    angle, config,
    num::{Float, Real, is_near_zero},
    transform::{AffineHost, RotationMatrix3x3, TransformationMatrix},
    vector::{Vector3, Vector4, write_separated},
};
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A quaternion `x i + y j + z k + w`.
///
/// Only unit quaternions represent pure rotations, but the length is never
/// adjusted automatically. Rotating a vector `v` computes `q v q*`, which
/// matches `v * R` for the [`RotationMatrix3x3`] `R` built from `q`.
/// Because of the row-vector convention, the matrix of the product `q1 * q2`
/// equals `R(q2) * R(q1)`.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Zeroable, Pod)]
pub struct Quaternion {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

impl Quaternion {
    #[inline]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// The quaternion `(0, 0, 0, 1)`, representing no rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Creates the quaternion with the given vector part and scalar part.
    #[inline]
    pub const fn from_parts(vector: &Vector3, scalar: Real) -> Self {
        Self::new(vector.x, vector.y, vector.z, scalar)
    }

    /// Creates the quaternion representing the same rotation as
    /// [`RotationMatrix3x3::from_euler_angles`] with the same angles (in the
    /// configured unit).
    pub fn from_euler_angles(angle_x: Real, angle_y: Real, angle_z: Real) -> Self {
        let pitch = Self::from_axis_angle(&Vector3::unit_x(), angle_x);
        let yaw = Self::from_axis_angle(&Vector3::unit_y(), angle_y);
        let roll = Self::from_axis_angle(&Vector3::unit_z(), angle_z);
        yaw * pitch * roll
    }

    /// Creates the quaternion representing a rotation by `angle` (in the
    /// configured unit) about the given axis.
    ///
    /// The result only has unit length if the axis has. A zero axis gives
    /// `(0, 0, 0, cos(angle/2))`, which normalizes to the identity.
    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        let (sin, cos) = (0.5 * angle::configured_to_radians(angle)).sin_cos();
        Self::from_parts(&(axis * sin), cos)
    }

    /// Like [`Self::from_axis_angle`], ignoring the w-component of the axis.
    #[inline]
    pub fn from_axis_angle4(axis: &Vector4, angle: Real) -> Self {
        Self::from_axis_angle(&axis.xyz(), angle)
    }

    /// Creates the unit quaternion representing the given rotation matrix.
    ///
    /// The largest of the four possible divisors is used, so the result is
    /// accurate for rotations by any angle.
    pub fn from_rotation_matrix(rotation: &RotationMatrix3x3) -> Self {
        let m = &rotation.as_matrix().ij;
        let trace = m[0][0] + m[1][1] + m[2][2];

        if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::new(
                (m[1][2] - m[2][1]) / s,
                (m[2][0] - m[0][2]) / s,
                (m[0][1] - m[1][0]) / s,
                0.25 * s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = 2.0 * (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt();
            Self::new(
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] - m[2][1]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = 2.0 * (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt();
            Self::new(
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
                (m[2][0] - m[0][2]) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt();
            Self::new(
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
                (m[0][1] - m[1][0]) / s,
            )
        }
    }

    /// Creates the unit quaternion representing the rotation part of the
    /// given transformation.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the transformation has a zero
    /// scale factor.
    #[inline]
    pub fn from_transformation<M: AffineHost>(transformation: &TransformationMatrix<M>) -> Self {
        transformation.rotation_quaternion()
    }

    #[inline]
    pub const fn vector_part(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(&self) -> Real {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> Real {
        self.length_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit length. A zero quaternion gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.length()
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the multiplicative inverse, which is the conjugate divided by
    /// the squared length. A zero quaternion gives non-finite components.
    #[inline]
    pub fn inverted(&self) -> Self {
        self.conjugate() / self.length_squared()
    }

    /// Computes the inverse of a unit quaternion, which is its conjugate.
    /// The length is not checked.
    #[inline]
    pub fn unit_inverted(&self) -> Self {
        self.conjugate()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.abs_diff_eq(&Self::identity(), config::tolerance())
    }

    /// Interpolates linearly between the components of `q1` (for `t = 0`)
    /// and `q2` (for `t = 1`) and normalizes the result.
    pub fn lerp(t: Real, q1: &Self, q2: &Self) -> Self {
        (q1 * (1.0 - t) + q2 * t).normalized()
    }

    /// Interpolates along the great arc between the normalized `q1` (for
    /// `t = 0`) and `q2` (for `t = 1`) at constant angular velocity.
    ///
    /// The inputs are not flipped to the same hemisphere, so the
    /// interpolation may take the long way around. Nearly parallel inputs
    /// fall back to [`Self::lerp`]. Nearly opposite inputs have no unique
    /// great arc, so the path passes through a quaternion perpendicular to
    /// `q1`.
    pub fn slerp(t: Real, q1: &Self, q2: &Self) -> Self {
        let q1 = q1.normalized();
        let q2 = q2.normalized();

        let cos_angle = q1.dot(&q2).clamp(-1.0, 1.0);
        let angle = cos_angle.acos();
        let sin_angle = angle.sin();

        if is_near_zero(sin_angle, config::tolerance()) {
            if cos_angle > 0.0 {
                return Self::lerp(t, &q1, &q2);
            }
            let perpendicular = Self::new(-q1.y, q1.x, -q1.w, q1.z);
            let (sin_t, cos_t) = (t * Real::PI).sin_cos();
            return q1 * cos_t + perpendicular * sin_t;
        }

        let weight_1 = ((1.0 - t) * angle).sin() / sin_angle;
        let weight_2 = (t * angle).sin() / sin_angle;
        q1 * weight_1 + q2 * weight_2
    }

    /// Returns the rotation angle (in the configured unit) represented by
    /// this unit quaternion, in the range from zero to a full turn.
    #[inline]
    pub fn angle(&self) -> Real {
        angle::radians_to_configured(2.0 * self.w.clamp(-1.0, 1.0).acos())
    }

    /// Returns the unit rotation axis and the rotation angle (in the
    /// configured unit) represented by this unit quaternion. The axis is zero
    /// when the angle is zero.
    pub fn to_axis_angle(&self) -> (Vector3, Real) {
        let w = self.w.clamp(-1.0, 1.0);
        let sin_half_angle = (1.0 - w * w).sqrt();
        let axis = if is_near_zero(sin_half_angle, config::tolerance()) {
            Vector3::zeros()
        } else {
            self.vector_part() / sin_half_angle
        };
        (axis, angle::radians_to_configured(2.0 * w.acos()))
    }

    /// Returns the angles `(angle_x, angle_y, angle_z)` that
    /// [`Self::from_euler_angles`] would turn into an equivalent rotation, in
    /// the configured unit. See [`RotationMatrix3x3::to_euler_angles`].
    #[inline]
    pub fn to_euler_angles(&self) -> (Real, Real, Real) {
        self.to_rotation_matrix().to_euler_angles()
    }

    #[inline]
    pub fn to_rotation_matrix(&self) -> RotationMatrix3x3 {
        RotationMatrix3x3::from_quaternion(self)
    }

    /// Rotates the given vector by computing `q v q*`. The quaternion must
    /// have unit length for this to be a pure rotation.
    pub fn rotate_vector3(&self, vector: &Vector3) -> Vector3 {
        (self * Self::from_parts(vector, 0.0) * self.conjugate()).vector_part()
    }
}

impl Vector3 {
    /// Returns this vector rotated by the given unit quaternion.
    #[inline]
    pub fn rotated_by_quaternion(&self, quaternion: &Quaternion) -> Vector3 {
        quaternion.rotate_vector3(self)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::new(a.x + b.x, a.y + b.y, a.z + b.z, a.w + b.w)
});

impl_binop!(Sub, sub, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::new(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
});

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::new(
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
        a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
    )
});

impl_binop!(Div, div, Quaternion, Quaternion, Quaternion, |a, b| {
    a * b.inverted()
});

impl_binop!(Mul, mul, Quaternion, Real, Quaternion, |a, b| {
    Quaternion::new(a.x * *b, a.y * *b, a.z * *b, a.w * *b)
});

impl_binop!(Mul, mul, Real, Quaternion, Quaternion, |a, b| { b * *a });

impl_binop!(Div, div, Quaternion, Real, Quaternion, |a, b| {
    Quaternion::new(a.x / *b, a.y / *b, a.z / *b, a.w / *b)
});

impl_binop_assign!(AddAssign, add_assign, Quaternion, Quaternion, |a, b| {
    *a = *a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Quaternion, Quaternion, |a, b| {
    *a = *a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, Quaternion, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, Quaternion, Quaternion, |a, b| {
    *a = *a / b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, Real, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, Quaternion, Real, |a, b| {
    *a = *a / b;
});

impl_unary_op!(Neg, neg, Quaternion, Quaternion, |q| {
    Quaternion::new(-q.x, -q.y, -q.z, -q.w)
});

impl From<[Real; 4]> for Quaternion {
    fn from([x, y, z, w]: [Real; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Quaternion> for [Real; 4] {
    fn from(quaternion: Quaternion) -> Self {
        quaternion.to_array()
    }
}

impl_tolerant_eq!(Quaternion);

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    a.x.abs_diff_eq(&b.x, epsilon)
        && a.y.abs_diff_eq(&b.y, epsilon)
        && a.z.abs_diff_eq(&b.z, epsilon)
        && a.w.abs_diff_eq(&b.w, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.x, &b.x, epsilon, max_relative)
        && ::approx::RelativeEq::relative_eq(&a.y, &b.y, epsilon, max_relative)
        && ::approx::RelativeEq::relative_eq(&a.z, &b.z, epsilon, max_relative)
        && ::approx::RelativeEq::relative_eq(&a.w, &b.w, epsilon, max_relative)
});

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q(")?;
        write_separated(f, &self.to_array())?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        matrix::Matrix4x3,
        num::Float,
        transform::{ScalingMatrix3x3, TranslationMatrix},
    };
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn rotations_represent_same_rotation(a: &Quaternion, b: &Quaternion) -> bool {
        a.to_rotation_matrix()
            .abs_diff_eq(&b.to_rotation_matrix(), 1e-4)
    }

    #[test]
    fn identity_and_scalar_products_have_expected_components() {
        let identity = Quaternion::identity();
        assert_eq!(identity, Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quaternion::default(), identity);
        assert!(identity.is_identity());

        assert_eq!(
            Quaternion::new(1.0, 0.0, 2.0, 3.0) * 0.5,
            Quaternion::new(0.5, 0.0, 1.0, 1.5)
        );
        assert_eq!(
            2.0 * Quaternion::new(1.0, 0.0, 2.0, 3.0),
            Quaternion::new(2.0, 0.0, 4.0, 6.0)
        );
        approx::assert_relative_eq!(
            3.0 * Quaternion::new(1.0, 0.0, 2.0, 3.0),
            Quaternion::new(3.0, 0.0, 6.0, 9.0)
        );
    }

    #[test]
    fn quaternion_display_is_compact() {
        assert_eq!(Quaternion::new(1.0, -2.0, 0.5, 3.0).to_string(), "Q(1,-2,0.5,3)");
    }

    #[test]
    fn quaternion_arithmetic_works() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(-1.0, 0.5, 0.0, 2.0);
        assert_abs_diff_eq!(a + b, Quaternion::new(0.0, 2.5, 3.0, 6.0));
        assert_abs_diff_eq!(a - b, Quaternion::new(2.0, 1.5, 3.0, 2.0));
        assert_abs_diff_eq!(-a, Quaternion::new(-1.0, -2.0, -3.0, -4.0));
        assert_abs_diff_eq!(a / 2.0, Quaternion::new(0.5, 1.0, 1.5, 2.0));
        assert_abs_diff_eq!(a.dot(&b), 8.0);
        assert_abs_diff_eq!(a.length_squared(), 30.0);

        let mut c = a;
        c += b;
        c -= a;
        c *= 2.0;
        c /= 4.0;
        assert_abs_diff_eq!(c, b * 0.5);
    }

    #[test]
    fn hamilton_product_of_basis_elements() {
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(i * j * k, Quaternion::new(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn product_only_commutes_with_identity() {
        let a = Quaternion::from_axis_angle(&Vector3::unit_x(), 0.7);
        let b = Quaternion::from_axis_angle(&Vector3::unit_y(), -1.2);
        assert_ne!(a * b, b * a);
        assert_eq!(a * Quaternion::identity(), a);
        assert_eq!(Quaternion::identity() * a, a);
    }

    #[test]
    fn inverse_of_unit_quaternion_is_conjugate() {
        let q = Quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, 2.0).normalized(), 1.1);
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-6);
        assert_eq!(q * q.inverted(), Quaternion::identity());
        assert_eq!(q.unit_inverted(), q.inverted());
    }

    #[test]
    fn inverse_of_general_quaternion_is_scaled_conjugate() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_abs_diff_eq!(q * q.inverted(), Quaternion::identity(), epsilon = 1e-6);
        assert_abs_diff_eq!(q.inverted() * 30.0, q.conjugate(), epsilon = 1e-5);
    }

    #[test]
    fn division_multiplies_with_inverse() {
        let a = Quaternion::new(1.0, -1.0, 0.5, 2.0);
        let b = Quaternion::new(0.0, 3.0, 1.0, -1.0);
        assert_abs_diff_eq!(a / b, a * b.inverted());
        assert_abs_diff_eq!((a / b) * b, a, epsilon = 1e-5);

        let mut c = a;
        c *= b;
        c /= b;
        assert_abs_diff_eq!(c, a, epsilon = 1e-5);
    }

    #[test]
    fn euler_quaternion_matches_euler_matrix() {
        let (x, y, z) = (0.4, -1.1, 2.3);
        let q = Quaternion::from_euler_angles(x, y, z);
        assert_abs_diff_eq!(
            q.to_rotation_matrix(),
            RotationMatrix3x3::from_euler_angles(x, y, z),
            epsilon = 1e-5
        );
    }

    #[test]
    fn euler_round_trip_through_matrix_and_quaternion_preserves_rotation() {
        let matrix = RotationMatrix3x3::from_euler_angles(
            Real::FRAC_PI_4,
            Real::PI / 3.0,
            Real::FRAC_PI_2,
        );
        let (x, y, z) = matrix.to_quaternion().to_euler_angles();
        let recovered = RotationMatrix3x3::from_euler_angles(x, y, z);

        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(v * recovered, v * matrix, epsilon = 1e-4);
        assert_abs_diff_eq!(x, Real::FRAC_PI_4, epsilon = 1e-4);
        assert_abs_diff_eq!(y, Real::PI / 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(z, Real::FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn rotation_matrix_conversion_covers_every_branch() {
        let half_turns = [
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Quaternion::new(0.0, 1.0, 0.0, 0.0),
            Quaternion::new(0.0, 0.0, 1.0, 0.0),
            Quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 1.0).normalized(), 0.3),
        ];
        for q in half_turns {
            let recovered = Quaternion::from_rotation_matrix(&q.to_rotation_matrix());
            assert!(rotations_represent_same_rotation(&recovered, &q));
            assert_abs_diff_eq!(recovered.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn quaternion_rotates_vectors_like_matrix() {
        let q = Quaternion::from_axis_angle(&Vector3::unit_z(), Real::FRAC_PI_2);
        assert_abs_diff_eq!(
            q.rotate_vector3(&Vector3::unit_x()),
            Vector3::unit_y(),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            Vector3::unit_x().rotated_by_quaternion(&q),
            Vector3::unit_x() * q.to_rotation_matrix(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn axis_angle_round_trips() {
        let q = Quaternion::from_axis_angle(&Vector3::unit_z(), Real::FRAC_PI_2);
        let (axis, angle) = q.to_axis_angle();
        assert_abs_diff_eq!(axis, Vector3::unit_z(), epsilon = 1e-5);
        assert_abs_diff_eq!(angle, Real::FRAC_PI_2, epsilon = 1e-5);
        assert_abs_diff_eq!(q.angle(), Real::FRAC_PI_2, epsilon = 1e-5);

        let q4 = Quaternion::from_axis_angle4(&Vector4::new(0.0, 0.0, 1.0, 7.0), Real::FRAC_PI_2);
        assert_eq!(q4, q);
    }

    #[test]
    fn zero_angle_gives_zero_axis() {
        let (axis, angle) = Quaternion::identity().to_axis_angle();
        assert!(axis.is_zero());
        assert_abs_diff_eq!(angle, 0.0);
    }

    #[test]
    fn zero_axis_normalizes_to_identity() {
        let q = Quaternion::from_axis_angle(&Vector3::zeros(), 1.0);
        assert_abs_diff_eq!(q, Quaternion::new(0.0, 0.0, 0.0, (0.5 as Real).cos()));
        assert!(q.normalized().is_identity());
    }

    #[test]
    fn slerp_hits_normalized_endpoints() {
        let q1 = Quaternion::new(1.0, 2.0, 0.0, 2.0);
        let q2 = Quaternion::from_axis_angle(&Vector3::unit_y(), 2.0) * 3.0;
        assert_abs_diff_eq!(Quaternion::slerp(0.0, &q1, &q2), q1.normalized(), epsilon = 1e-5);
        assert_abs_diff_eq!(Quaternion::slerp(1.0, &q1, &q2), q2.normalized(), epsilon = 1e-5);
    }

    #[test]
    fn slerp_halfway_halves_rotation_angle() {
        let q = Quaternion::from_axis_angle(&Vector3::unit_z(), Real::FRAC_PI_2);
        let halfway = Quaternion::slerp(0.5, &Quaternion::identity(), &q);
        assert_abs_diff_eq!(
            halfway,
            Quaternion::from_axis_angle(&Vector3::unit_z(), Real::FRAC_PI_4),
            epsilon = 1e-5
        );
    }

    #[test]
    fn slerp_of_equal_inputs_falls_back_to_lerp() {
        let q = Quaternion::from_axis_angle(&Vector3::unit_x(), 0.5);
        assert_abs_diff_eq!(Quaternion::slerp(0.3, &q, &q), q, epsilon = 1e-5);
    }

    #[test]
    fn slerp_between_opposite_quaternions_stays_finite() {
        let q = Quaternion::from_axis_angle(&Vector3::unit_z(), 0.5);
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let interpolated = Quaternion::slerp(t, &q, &-q);
            assert!(interpolated.to_array().iter().all(|c| c.is_finite()));
            assert_abs_diff_eq!(interpolated.length(), 1.0, epsilon = 1e-5);
        }
        let halfway = Quaternion::slerp(0.5, &q, &-q);
        assert_abs_diff_eq!(halfway.dot(&q), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(Quaternion::slerp(0.0, &q, &-q), q, epsilon = 1e-5);
        assert_abs_diff_eq!(Quaternion::slerp(1.0, &q, &-q), -q, epsilon = 1e-5);
    }

    #[test]
    fn product_of_non_unit_quaternions_is_not_normalized() {
        let a = Quaternion::new(1.0, 2.0, 0.0, 2.0);
        let b = Quaternion::new(0.0, 0.0, 4.0, 0.0);
        assert_abs_diff_eq!((a * b).length(), 12.0, epsilon = 1e-4);
        assert_abs_diff_eq!((a * b).length(), a.length() * b.length(), epsilon = 1e-4);
    }

    #[test]
    fn unit_inverse_of_non_unit_quaternion_differs_from_inverse() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.unit_inverted(), q.conjugate());
        assert_ne!(q.unit_inverted(), q.inverted());
        assert_abs_diff_eq!(q.unit_inverted(), q.inverted() * 30.0, epsilon = 1e-5);
    }

    #[test]
    fn lerp_with_conjugate_gives_identity() {
        let q = Quaternion::from_axis_angle(&Vector3::new(0.0, 0.6, 0.8), 1.0);
        assert!(q.w > 0.0);
        assert_eq!(Quaternion::lerp(0.5, &q, &q.conjugate()), Quaternion::identity());
    }

    #[test]
    fn quaternion_from_transformation_ignores_translation_and_scaling() {
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_x(), 0.9);
        let tf = TransformationMatrix::<Matrix4x3>::from_parts(
            &TranslationMatrix::new(5.0, 6.0, 7.0),
            &RotationMatrix3x3::from_quaternion(&rotation),
            &ScalingMatrix3x3::new(2.0, 3.0, 4.0),
        );
        assert!(rotations_represent_same_rotation(
            &Quaternion::from_transformation(&tf),
            &rotation
        ));
    }

    prop_compose! {
        fn unit_quaternion_strategy()(
            axis in prop::array::uniform3(-1.0 as Real..1.0),
            angle in -3.0 as Real..3.0,
        ) -> Quaternion {
            let axis = Vector3::from_array(axis);
            if axis.norm() < 1e-3 {
                Quaternion::identity()
            } else {
                Quaternion::from_axis_angle(&axis.normalized(), angle)
            }
        }
    }

    proptest! {
        #[test]
        fn rotating_with_quaternion_matches_matrix(
            q in unit_quaternion_strategy(),
            v in prop::array::uniform3(-10.0 as Real..10.0),
        ) {
            let v = Vector3::from_array(v);
            prop_assert!(approx::abs_diff_eq!(
                q.rotate_vector3(&v),
                v * q.to_rotation_matrix(),
                epsilon = 1e-3
            ));
        }

        #[test]
        fn matrix_of_product_applies_right_factor_first(
            q1 in unit_quaternion_strategy(),
            q2 in unit_quaternion_strategy(),
        ) {
            prop_assert!(approx::abs_diff_eq!(
                (q1 * q2).to_rotation_matrix(),
                q2.to_rotation_matrix() * q1.to_rotation_matrix(),
                epsilon = 1e-4
            ));
        }

        #[test]
        fn matrix_round_trip_preserves_rotation(q in unit_quaternion_strategy()) {
            let recovered = q.to_rotation_matrix().to_quaternion();
            prop_assert!(rotations_represent_same_rotation(&recovered, &q));
        }
    }
}
