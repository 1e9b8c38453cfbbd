//! Scaling matrices.

use super::{
    AffineHost, RotationMatrix3x3, TransformationMatrix, TranslationMatrix,
    impl_matrix_wrapper_traits,
};
use crate::{matrix::Matrix3x3, num::Real, vector::Vector3};
use std::ops::Mul;

/// A diagonal 3x3 matrix scaling each axis independently.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingMatrix3x3(Matrix3x3);

impl ScalingMatrix3x3 {
    /// Creates a matrix scaling the axes by the given factors.
    #[inline]
    pub const fn new(sx: Real, sy: Real, sz: Real) -> Self {
        Self::from_vector3(&Vector3::new(sx, sy, sz))
    }

    /// Creates a matrix scaling the axes by the components of the given
    /// vector.
    #[inline]
    pub const fn from_vector3(scale: &Vector3) -> Self {
        Self(Matrix3x3::from_diagonal(scale))
    }

    #[inline]
    pub const fn identity() -> Self {
        Self(Matrix3x3::identity())
    }

    /// Wraps the given matrix without checking that it is diagonal.
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

    /// Returns the scale factors along each axis.
    #[inline]
    pub fn scale(&self) -> Vector3 {
        self.0.diagonal()
    }

    /// Returns the matrix with reciprocal scale factors. Zero factors give
    /// non-finite results.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self::from_vector3(&self.scale().mapped(Real::recip))
    }

    /// Whether all scale factors are non-zero.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Returns the product of the scale factors.
    #[inline]
    pub fn determinant(&self) -> Real {
        let scale = self.scale();
        scale.x * scale.y * scale.z
    }

    #[inline]
    pub fn reset_to_identity(&mut self) {
        *self = Self::identity();
    }
}

impl Default for ScalingMatrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl_matrix_wrapper_traits!(ScalingMatrix3x3);

impl_binop!(
    Mul,
    mul,
    ScalingMatrix3x3,
    ScalingMatrix3x3,
    ScalingMatrix3x3,
    |a, b| { ScalingMatrix3x3::from_vector3(&a.scale().component_mul(&b.scale())) }
);

impl_binop!(
    Mul,
    mul,
    ScalingMatrix3x3,
    RotationMatrix3x3,
    Matrix3x3,
    |a, b| { a.0 * b.as_matrix() }
);

impl_binop!(Mul, mul, Vector3, ScalingMatrix3x3, Vector3, |a, b| {
    a.component_mul(&b.scale())
});

impl_binop_assign!(
    MulAssign,
    mul_assign,
    ScalingMatrix3x3,
    ScalingMatrix3x3,
    |a, b| { *a = (*a).mul(b); }
);

impl<M: AffineHost> Mul<TranslationMatrix<M>> for ScalingMatrix3x3 {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TranslationMatrix<M>) -> Self::Output {
        TransformationMatrix::unchecked_from_matrix(M::from_affine_parts(
            &self.0,
            &rhs.displacement(),
        ))
    }
}

impl<M: AffineHost> Mul<TransformationMatrix<M>> for ScalingMatrix3x3 {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TransformationMatrix<M>) -> Self::Output {
        TransformationMatrix::<M>::from_linear(&self.0) * rhs
    }
}
