//! Rotation matrices.

use super::{
    AffineHost, ScalingMatrix3x3, TransformationMatrix, TranslationMatrix,
    impl_matrix_wrapper_traits,
};
use crate::{
    angle,
    matrix::Matrix3x3,
    num::Real,
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};
use std::ops::{Mul, MulAssign};

/// Below this value of the cosine of the pitch angle, Euler angle extraction
/// treats the rotation as gimbal locked.
const GIMBAL_LOCK_COS_THRESHOLD: Real = 1e-6;

/// A 3x3 matrix representing a rotation, acting on row vectors.
///
/// The matrix is expected to be orthonormal with determinant one. This is
/// guaranteed by the angle- and quaternion-based constructors but not
/// checked by [`Self::from_matrix`] or [`Self::unchecked_from_matrix`].
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatrix3x3(Matrix3x3);

impl RotationMatrix3x3 {
    /// Creates the identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self(Matrix3x3::identity())
    }

    /// Creates the rotation obtained by rolling by `angle_z` about the
    /// z-axis, then pitching by `angle_x` about the x-axis and finally
    /// yawing by `angle_y` about the y-axis. Angles are in the configured
    /// unit.
    pub fn from_euler_angles(angle_x: Real, angle_y: Real, angle_z: Real) -> Self {
        let pitch = angle::configured_to_radians(angle_x);
        let yaw = angle::configured_to_radians(angle_y);
        let roll = angle::configured_to_radians(angle_z);
        Self(about_z(roll) * about_x(pitch) * about_y(yaw))
    }

    /// Creates the rotation by `angle` (in the configured unit) about the
    /// given axis, using Rodrigues' formula.
    ///
    /// The axis must have unit length for the result to be a rotation; this
    /// is not checked. A zero axis gives the identity.
    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        let (sin, cos) = angle::configured_to_radians(angle).sin_cos();
        let k = axis;
        let one_minus_cos = 1.0 - cos;
        Self(Matrix3x3::new([
            [
                1.0 - one_minus_cos * (k.y * k.y + k.z * k.z),
                sin * k.z + one_minus_cos * k.x * k.y,
                -sin * k.y + one_minus_cos * k.x * k.z,
            ],
            [
                -sin * k.z + one_minus_cos * k.x * k.y,
                1.0 - one_minus_cos * (k.x * k.x + k.z * k.z),
                sin * k.x + one_minus_cos * k.y * k.z,
            ],
            [
                sin * k.y + one_minus_cos * k.x * k.z,
                -sin * k.x + one_minus_cos * k.y * k.z,
                1.0 - one_minus_cos * (k.x * k.x + k.y * k.y),
            ],
        ]))
    }

    /// Like [`Self::from_axis_angle`], ignoring the w-component of the axis.
    #[inline]
    pub fn from_axis_angle4(axis: &Vector4, angle: Real) -> Self {
        Self::from_axis_angle(&axis.xyz(), angle)
    }

    /// Creates the rotation matrix equivalent to the given quaternion, so
    /// that `v * R` equals `q v q*`. The quaternion must have unit length for
    /// the result to be a rotation.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let Quaternion { x, y, z, w } = *q;
        Self(Matrix3x3::new([
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y + z * w),
                2.0 * (x * z - y * w),
            ],
            [
                2.0 * (x * y - z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z + x * w),
            ],
            [
                2.0 * (x * z + y * w),
                2.0 * (y * z - x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]))
    }

    /// Wraps the given matrix, which is assumed to be a rotation.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the matrix is zero.
    pub fn from_matrix(matrix: Matrix3x3) -> Self {
        math_assert!(
            !matrix.is_zero(),
            "Tried to create rotation from null matrix"
        );
        Self(matrix)
    }

    /// Wraps the given matrix without any checks.
    #[inline]
    pub const fn unchecked_from_matrix(matrix: Matrix3x3) -> Self {
        Self(matrix)
    }

    #[inline]
    pub const fn as_matrix(&self) -> &Matrix3x3 {
        &self.0
    }

    #[inline]
    pub const fn into_matrix(self) -> Matrix3x3 {
        self.0
    }

    /// Returns the inverse rotation, which is the transpose.
    #[inline]
    pub fn inverted(&self) -> Self {
        self.transposed()
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        Self(self.0.transposed())
    }

    /// A rotation always has an inverse.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        true
    }

    /// A rotation always has determinant one.
    #[inline]
    pub fn determinant(&self) -> Real {
        1.0
    }

    #[inline]
    pub fn reset_to_identity(&mut self) {
        *self = Self::identity();
    }

    /// Returns the angles `(angle_x, angle_y, angle_z)` that
    /// [`Self::from_euler_angles`] would turn into this rotation, in the
    /// configured unit.
    ///
    /// When the pitch is ±90 degrees, only the difference between roll and
    /// yaw is determined. The roll is then set to zero and the yaw absorbs
    /// it, which gives an equivalent rotation but not necessarily the
    /// original angles.
    pub fn to_euler_angles(&self) -> (Real, Real, Real) {
        let m = &self.0.ij;
        let cos_pitch = (m[2][0] * m[2][0] + m[2][2] * m[2][2]).sqrt();
        let pitch = (-m[2][1]).atan2(cos_pitch);

        let (yaw, roll) = if cos_pitch > GIMBAL_LOCK_COS_THRESHOLD {
            (m[2][0].atan2(m[2][2]), m[0][1].atan2(m[1][1]))
        } else {
            ((-m[0][2]).atan2(m[0][0]), 0.0)
        };

        (
            angle::radians_to_configured(pitch),
            angle::radians_to_configured(yaw),
            angle::radians_to_configured(roll),
        )
    }

    /// Returns the unit quaternion representing this rotation.
    #[inline]
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(self)
    }

    /// Returns the rotation axis and the angle (in the configured unit) about
    /// it. The axis is zero when the angle is zero.
    #[inline]
    pub fn to_axis_angle(&self) -> (Vector3, Real) {
        self.to_quaternion().to_axis_angle()
    }
}

impl Default for RotationMatrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl_matrix_wrapper_traits!(RotationMatrix3x3);

impl_binop!(
    Mul,
    mul,
    RotationMatrix3x3,
    RotationMatrix3x3,
    RotationMatrix3x3,
    |a, b| { RotationMatrix3x3(a.0 * b.0) }
);

impl_binop!(
    Mul,
    mul,
    RotationMatrix3x3,
    ScalingMatrix3x3,
    Matrix3x3,
    |a, b| { a.0 * b.as_matrix() }
);

impl_binop!(Mul, mul, RotationMatrix3x3, Matrix3x3, Matrix3x3, |a, b| {
    a.0 * b
});

impl_binop!(Mul, mul, Vector3, RotationMatrix3x3, Vector3, |a, b| {
    a * b.0
});

impl_binop_assign!(
    MulAssign,
    mul_assign,
    RotationMatrix3x3,
    RotationMatrix3x3,
    |a, b| { *a = (*a).mul(b); }
);

impl_binop_assign!(MulAssign, mul_assign, Vector3, RotationMatrix3x3, |a, b| {
    *a = (*a).mul(b);
});

impl<M: AffineHost> Mul<TranslationMatrix<M>> for RotationMatrix3x3 {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TranslationMatrix<M>) -> Self::Output {
        TransformationMatrix::unchecked_from_matrix(M::from_affine_parts(
            &self.0,
            &rhs.displacement(),
        ))
    }
}

impl<M: AffineHost> Mul<TransformationMatrix<M>> for RotationMatrix3x3 {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TransformationMatrix<M>) -> Self::Output {
        TransformationMatrix::<M>::from_linear(&self.0) * rhs
    }
}

impl MulAssign<&RotationMatrix3x3> for Matrix3x3 {
    fn mul_assign(&mut self, rhs: &RotationMatrix3x3) {
        *self = &*self * rhs.as_matrix();
    }
}

/// Rotation by the given angle in radians about the x-axis.
fn about_x(angle: Real) -> Matrix3x3 {
    let (sin, cos) = angle.sin_cos();
    Matrix3x3::new([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]])
}

/// Rotation by the given angle in radians about the y-axis.
fn about_y(angle: Real) -> Matrix3x3 {
    let (sin, cos) = angle.sin_cos();
    Matrix3x3::new([[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]])
}

/// Rotation by the given angle in radians about the z-axis.
fn about_z(angle: Real) -> Matrix3x3 {
    let (sin, cos) = angle.sin_cos();
    Matrix3x3::new([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
}
