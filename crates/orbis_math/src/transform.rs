//! Transforms.
//!
//! Rotation and scaling are stored as 3x3 matrices, while translations and
//! general affine transformations are stored in a host matrix with four rows
//! (see [`AffineHost`]). Products follow the row-vector convention, so
//! `A * B` applies `A` first.

mod rotation;
mod scaling;
mod space_conversion;
mod transformation;
mod translation;

pub use rotation::RotationMatrix3x3;
pub use scaling::ScalingMatrix3x3;
pub use space_conversion::SpaceConversionMatrix;
pub use transformation::TransformationMatrix;
pub use translation::TranslationMatrix;

use crate::{
    matrix::{Matrix3x3, Matrix4x3, Matrix4x4},
    num::Real,
    vector::Vector3,
};
use approx::AbsDiffEq;
use std::fmt;

/// A matrix with four rows that can store an affine transform, with the
/// linear part in the upper 3x3 block and the translation in the last row.
pub trait AffineHost:
    Copy + fmt::Debug + fmt::Display + PartialEq + AbsDiffEq<Epsilon = Real>
{
    /// The host matrix representing the identity transform.
    fn identity() -> Self;

    /// Creates a host matrix from the given linear part and translation.
    fn from_affine_parts(linear: &Matrix3x3, translation: &Vector3) -> Self;

    /// Returns the upper 3x3 block.
    fn linear_part(&self) -> Matrix3x3;

    /// Returns the first three elements of the last row.
    fn translation_part(&self) -> Vector3;

    /// Overwrites the first three elements of the last row.
    fn set_translation_part(&mut self, translation: &Vector3);

    /// Returns the host matrix as a 4x4 matrix.
    fn to_matrix4x4(&self) -> Matrix4x4;

    /// Converts the affine transform stored in another host type.
    #[inline]
    fn from_host<N: AffineHost>(other: &N) -> Self {
        Self::from_affine_parts(&other.linear_part(), &other.translation_part())
    }

    /// Computes the product of two affine transforms, applying `self`
    /// first.
    #[inline]
    fn affine_product(&self, other: &Self) -> Self {
        let other_linear = other.linear_part();
        Self::from_affine_parts(
            &(self.linear_part() * other_linear),
            &(self.translation_part() * other_linear + other.translation_part()),
        )
    }

    /// Computes the inverse affine transform.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the linear part is singular.
    #[inline]
    fn affine_inverse(&self) -> Self {
        let inverse_linear = self.linear_part().inverted();
        Self::from_affine_parts(
            &inverse_linear,
            &-(self.translation_part() * inverse_linear),
        )
    }

    /// Applies the transform to the given point.
    #[inline]
    fn transform_point(&self, point: &Vector3) -> Vector3 {
        point * self.linear_part() + self.translation_part()
    }

    /// Applies the linear part of the transform to the given direction.
    #[inline]
    fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        vector * self.linear_part()
    }
}

impl AffineHost for Matrix4x3 {
    #[inline]
    fn identity() -> Self {
        Matrix4x3::identity()
    }

    #[inline]
    fn from_affine_parts(linear: &Matrix3x3, translation: &Vector3) -> Self {
        let [r0, r1, r2] = linear.ij;
        Self::new([r0, r1, r2, translation.to_array()])
    }

    #[inline]
    fn linear_part(&self) -> Matrix3x3 {
        self.upper_left_3x3()
    }

    #[inline]
    fn translation_part(&self) -> Vector3 {
        self.last_row()
    }

    #[inline]
    fn set_translation_part(&mut self, translation: &Vector3) {
        self.set_row(3, translation);
    }

    #[inline]
    fn to_matrix4x4(&self) -> Matrix4x4 {
        Matrix4x3::to_matrix4x4(self)
    }

    #[inline]
    fn affine_product(&self, other: &Self) -> Self {
        self * other
    }
}

impl AffineHost for Matrix4x4 {
    #[inline]
    fn identity() -> Self {
        Matrix4x4::identity()
    }

    #[inline]
    fn from_affine_parts(linear: &Matrix3x3, translation: &Vector3) -> Self {
        Matrix4x3::from_affine_parts(linear, translation).to_matrix4x4()
    }

    #[inline]
    fn linear_part(&self) -> Matrix3x3 {
        self.upper_left_3x3()
    }

    #[inline]
    fn translation_part(&self) -> Vector3 {
        self.row(3).xyz()
    }

    #[inline]
    fn set_translation_part(&mut self, translation: &Vector3) {
        self.ij[3][..3].copy_from_slice(&translation.to_array());
    }

    #[inline]
    fn to_matrix4x4(&self) -> Matrix4x4 {
        *self
    }
}

/// Implements `Display`, `AbsDiffEq` and `RelativeEq` for a newtype over a
/// matrix by delegating to the stored matrix.
macro_rules! impl_matrix_wrapper_traits {
    ($t:ty) => {
        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl_abs_diff_eq!($t, |a, b, epsilon| {
            ::approx::AbsDiffEq::abs_diff_eq(&a.0, &b.0, epsilon)
        });

        impl_relative_eq!($t, |a, b, epsilon, max_relative| {
            ::approx::RelativeEq::relative_eq(&a.0, &b.0, epsilon, max_relative)
        });
    };
}

/// Like [`impl_matrix_wrapper_traits`], for a newtype generic over its
/// [`AffineHost`].
macro_rules! impl_host_wrapper_traits {
    ($t:ident) => {
        impl<M: $crate::transform::AffineHost> ::std::fmt::Display for $t<M> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl<M: $crate::transform::AffineHost> ::approx::AbsDiffEq for $t<M> {
            type Epsilon = $crate::num::Real;

            fn default_epsilon() -> $crate::num::Real {
                <$crate::num::Real as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: $crate::num::Real) -> bool {
                ::approx::AbsDiffEq::abs_diff_eq(&self.0, &other.0, epsilon)
            }
        }
    };
}

pub(crate) use impl_host_wrapper_traits;
pub(crate) use impl_matrix_wrapper_traits;
