//! Translation matrices.

use super::{
    AffineHost, RotationMatrix3x3, ScalingMatrix3x3, TransformationMatrix,
    impl_host_wrapper_traits,
};
use crate::{
    matrix::Matrix3x3,
    num::Real,
    vector::{Vector3, Vector4},
};
use std::ops::{Mul, MulAssign};

/// A pure displacement stored in a host matrix `M` ([`Matrix4x3`] or
/// [`Matrix4x4`]), with the displacement in the last row.
///
/// Only operations that keep the matrix a pure translation are available.
/// The host matrix can be read through [`Self::as_matrix`].
///
/// [`Matrix4x3`]: crate::matrix::Matrix4x3
/// [`Matrix4x4`]: crate::matrix::Matrix4x4
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslationMatrix<M>(M);

impl<M: AffineHost> TranslationMatrix<M> {
    /// Creates a translation by the given displacement.
    #[inline]
    pub fn new(dx: Real, dy: Real, dz: Real) -> Self {
        Self::from_vector3(&Vector3::new(dx, dy, dz))
    }

    #[inline]
    pub fn from_vector3(displacement: &Vector3) -> Self {
        Self(M::from_affine_parts(&Matrix3x3::identity(), displacement))
    }

    /// Creates a translation by the first three components of the given
    /// vector.
    #[inline]
    pub fn from_vector4(displacement: &Vector4) -> Self {
        Self::from_vector3(&displacement.xyz())
    }

    #[inline]
    pub fn identity() -> Self {
        Self(M::identity())
    }

    /// Wraps the given matrix without checking that it is a pure translation.
    #[inline]
    pub const fn unchecked_from_matrix(matrix: M) -> Self {
        Self(matrix)
    }

    #[inline]
    pub const fn as_matrix(&self) -> &M {
        &self.0
    }

    #[inline]
    pub fn into_matrix(self) -> M {
        self.0
    }

    /// Returns the displacement stored in the last row.
    #[inline]
    pub fn displacement(&self) -> Vector3 {
        self.0.translation_part()
    }

    /// Returns the translation by the negated displacement.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self::from_vector3(&-self.displacement())
    }

    /// A translation always has an inverse.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        true
    }

    /// A translation always has determinant one.
    #[inline]
    pub fn determinant(&self) -> Real {
        1.0
    }

    #[inline]
    pub fn reset_to_identity(&mut self) {
        *self = Self::identity();
    }

    /// Applies the displacement to the given point.
    #[inline]
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        point + self.displacement()
    }

    /// Returns the same translation stored in another host type.
    #[inline]
    pub fn with_host<N: AffineHost>(&self) -> TranslationMatrix<N> {
        TranslationMatrix::from_vector3(&self.displacement())
    }
}

impl<M: AffineHost> Default for TranslationMatrix<M> {
    fn default() -> Self {
        Self::identity()
    }
}

impl_host_wrapper_traits!(TranslationMatrix);

// Translations commute, so the product is the sum of the displacements.
impl<M: AffineHost, N: AffineHost> Mul<TranslationMatrix<N>> for TranslationMatrix<M> {
    type Output = TranslationMatrix<M>;

    fn mul(self, rhs: TranslationMatrix<N>) -> Self::Output {
        TranslationMatrix::from_vector3(&(self.displacement() + rhs.displacement()))
    }
}

impl<M: AffineHost, N: AffineHost> MulAssign<TranslationMatrix<N>> for TranslationMatrix<M> {
    fn mul_assign(&mut self, rhs: TranslationMatrix<N>) {
        *self = *self * rhs;
    }
}

impl<M: AffineHost> Mul<RotationMatrix3x3> for TranslationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: RotationMatrix3x3) -> Self::Output {
        TransformationMatrix::<M>::from(self) * rhs
    }
}

impl<M: AffineHost> Mul<ScalingMatrix3x3> for TranslationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: ScalingMatrix3x3) -> Self::Output {
        TransformationMatrix::<M>::from(self) * rhs
    }
}

impl<M: AffineHost, N: AffineHost> Mul<TransformationMatrix<N>> for TranslationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TransformationMatrix<N>) -> Self::Output {
        TransformationMatrix::<M>::from(self) * rhs
    }
}
