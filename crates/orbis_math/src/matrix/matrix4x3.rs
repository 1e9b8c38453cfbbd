//! 4x3 matrices.

use super::{Matrix3x3, Matrix3x4, Matrix4x3, Matrix4x4, multiply, multiply_row};
use crate::{
    num::Real,
    vector::{Vector3, Vector4},
};
use std::ops::Mul;

impl Matrix4x3 {
    /// Returns the 4x4 matrix obtained by appending the implied last column
    /// `(0, 0, 0, 1)`.
    #[inline]
    pub fn to_matrix4x4(&self) -> Matrix4x4 {
        let [r0, r1, r2, r3] = self.ij;
        Matrix4x4::new([
            [r0[0], r0[1], r0[2], 0.0],
            [r1[0], r1[1], r1[2], 0.0],
            [r2[0], r2[1], r2[2], 0.0],
            [r3[0], r3[1], r3[2], 1.0],
        ])
    }

    /// Returns the upper 3x3 block of the matrix.
    #[inline]
    pub fn upper_left_3x3(&self) -> Matrix3x3 {
        Matrix3x3::new([self.ij[0], self.ij[1], self.ij[2]])
    }

    /// Returns the last row of the matrix.
    #[inline]
    pub fn last_row(&self) -> Vector3 {
        self.row(3)
    }

    /// Computes the determinant of the 4x4 matrix implied by the last column
    /// `(0, 0, 0, 1)`, which equals the determinant of the upper 3x3 block.
    #[inline]
    pub fn determinant(&self) -> Real {
        self.upper_left_3x3().determinant()
    }

    /// Whether the implied 4x4 matrix has a non-zero determinant.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Computes the inverse of the implied 4x4 matrix. The inverse again has
    /// the last column `(0, 0, 0, 1)`, which is dropped.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the matrix is singular.
    pub fn inverted(&self) -> Self {
        let inverse_linear = self.upper_left_3x3().inverted();
        let inverse_translation = -(self.last_row() * inverse_linear);
        let [r0, r1, r2] = inverse_linear.ij;
        Self::new([r0, r1, r2, inverse_translation.to_array()])
    }
}

impl_binop!(Mul, mul, Matrix4x3, Matrix3x3, Matrix4x3, |a, b| {
    Matrix4x3::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Matrix4x3, Matrix3x4, Matrix4x4, |a, b| {
    Matrix4x4::new(multiply(&a.ij, &b.ij))
});

// Affine product, with both operands extended by the implied last column.
impl_binop!(Mul, mul, Matrix4x3, Matrix4x3, Matrix4x3, |a, b| {
    let linear = a.upper_left_3x3() * b.upper_left_3x3();
    let translation = a.last_row() * b.upper_left_3x3() + b.last_row();
    let [r0, r1, r2] = linear.ij;
    Matrix4x3::new([r0, r1, r2, translation.to_array()])
});

impl_binop!(Mul, mul, Vector4, Matrix4x3, Vector3, |a, b| {
    Vector3::from_array(multiply_row(&a.to_array(), &b.ij))
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4x3, Matrix3x3, |a, b| {
    *a = (*a).mul(b);
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4x3, Matrix4x3, |a, b| {
    *a = (*a).mul(b);
});
