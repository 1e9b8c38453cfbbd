//! View and projection matrices.

use super::{AffineHost, TransformationMatrix, impl_matrix_wrapper_traits};
use crate::{
    angle,
    matrix::Matrix4x4,
    num::Real,
    vector::{Vector3, Vector4},
};
use std::ops::Mul;

/// A 4x4 matrix converting points between spaces, such as from world space
/// to view space or from view space to clip space. All constructors use the
/// left-handed convention, with the view direction along the positive
/// z-axis.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceConversionMatrix(Matrix4x4);

impl SpaceConversionMatrix {
    #[inline]
    pub const fn identity() -> Self {
        Self(Matrix4x4::identity())
    }

    /// Creates the view matrix for a camera at `eye` looking at `target`,
    /// with `up` giving the approximate upward direction.
    ///
    /// # Panics
    /// Under the panic assertion policy, if `eye` equals `target` or if `up`
    /// is parallel to the view direction.
    pub fn view_look_at_lh(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let direction = target - eye;
        math_assert!(
            !direction.is_zero(),
            "Tried to create view matrix with coincident eye and target {}",
            eye
        );

        let z = direction.normalized();
        let right = up.cross(&z);
        math_assert!(
            !right.is_zero(),
            "Tried to create view matrix with up vector {} parallel to view direction {}",
            up,
            z
        );
        let x = right.normalized();
        let y = z.cross(&x);

        Self(Matrix4x4::new([
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0],
        ]))
    }

    /// Creates a perspective projection for the given vertical field of view
    /// (in the configured unit), ratio of width to height and near and far
    /// distances. Depth is mapped to the range from 0 at `near` to 1 at
    /// `far`.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the field of view or aspect
    /// ratio is zero or if `near` equals `far`.
    pub fn perspective_fov_lh(
        vertical_field_of_view: Real,
        aspect_ratio: Real,
        near: Real,
        far: Real,
    ) -> Self {
        let vertical_field_of_view = angle::configured_to_radians(vertical_field_of_view);
        math_assert!(
            vertical_field_of_view != 0.0,
            "Tried to create perspective projection with zero field of view"
        );
        math_assert!(
            aspect_ratio != 0.0,
            "Tried to create perspective projection with zero aspect ratio"
        );
        math_assert!(
            near != far,
            "Tried to create perspective projection with equal near and far distance {}",
            near
        );

        let y_scale = 1.0 / (0.5 * vertical_field_of_view).tan();
        let x_scale = y_scale / aspect_ratio;
        let depth_scale = far / (far - near);

        Self(Matrix4x4::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, depth_scale, 1.0],
            [0.0, 0.0, -near * depth_scale, 0.0],
        ]))
    }

    /// Creates an orthographic projection of a view box with the given width
    /// and height centered on the z-axis. Depth is mapped to the range from 0
    /// at `near` to 1 at `far`.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the width or height is zero or
    /// if `near` equals `far`.
    pub fn orthographic_lh(width: Real, height: Real, near: Real, far: Real) -> Self {
        math_assert!(
            width != 0.0 && height != 0.0,
            "Tried to create orthographic projection with zero extent {}x{}",
            width,
            height
        );
        math_assert!(
            near != far,
            "Tried to create orthographic projection with equal near and far distance {}",
            near
        );

        let depth_scale = 1.0 / (far - near);

        Self(Matrix4x4::new([
            [2.0 / width, 0.0, 0.0, 0.0],
            [0.0, 2.0 / height, 0.0, 0.0],
            [0.0, 0.0, depth_scale, 0.0],
            [0.0, 0.0, -near * depth_scale, 1.0],
        ]))
    }

    /// Wraps the given matrix without any checks.
    #[inline]
    pub const fn unchecked_from_matrix(matrix: Matrix4x4) -> Self {
        Self(matrix)
    }

    #[inline]
    pub const fn as_matrix(&self) -> &Matrix4x4 {
        &self.0
    }

    #[inline]
    pub const fn into_matrix(self) -> Matrix4x4 {
        self.0
    }

    /// Computes the inverse conversion.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the matrix is singular.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self(self.0.inverted())
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.0.has_inverse()
    }

    /// Converts the given point, dividing the result by its homogeneous
    /// coordinate. Points mapped to `w = 0` give non-finite components.
    #[inline]
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        let homogeneous = point.extended(1.0) * self.0;
        homogeneous.xyz() / homogeneous.w
    }

    /// Multiplies the given homogeneous vector with the matrix without any
    /// division.
    #[inline]
    pub fn transform_vector4(&self, vector: &Vector4) -> Vector4 {
        vector * self.0
    }

    #[inline]
    pub fn reset_to_identity(&mut self) {
        *self = Self::identity();
    }
}

impl Default for SpaceConversionMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl_matrix_wrapper_traits!(SpaceConversionMatrix);

impl_binop!(
    Mul,
    mul,
    SpaceConversionMatrix,
    SpaceConversionMatrix,
    SpaceConversionMatrix,
    |a, b| { SpaceConversionMatrix(a.0 * b.0) }
);

impl_binop_assign!(
    MulAssign,
    mul_assign,
    SpaceConversionMatrix,
    SpaceConversionMatrix,
    |a, b| { *a = (*a).mul(b); }
);

impl<M: AffineHost> Mul<SpaceConversionMatrix> for TransformationMatrix<M> {
    type Output = SpaceConversionMatrix;

    fn mul(self, rhs: SpaceConversionMatrix) -> Self::Output {
        SpaceConversionMatrix(self.as_matrix().to_matrix4x4() * rhs.0)
    }
}
