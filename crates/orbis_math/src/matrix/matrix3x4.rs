//! 3x4 matrices.

use super::{Matrix3x3, Matrix3x4, Matrix4x3, Matrix4x4, multiply, multiply_row};
use crate::vector::{Vector3, Vector4};
use std::ops::Mul;

impl Matrix3x4 {
    /// Returns the left 3x3 block of the matrix.
    #[inline]
    pub fn upper_left_3x3(&self) -> Matrix3x3 {
        Matrix3x3::new(self.ij.map(|[a, b, c, _]| [a, b, c]))
    }
}

impl_binop!(Mul, mul, Matrix3x4, Matrix4x3, Matrix3x3, |a, b| {
    Matrix3x3::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Matrix3x4, Matrix4x4, Matrix3x4, |a, b| {
    Matrix3x4::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Vector3, Matrix3x4, Vector4, |a, b| {
    Vector4::from_array(multiply_row(&a.to_array(), &b.ij))
});

impl_binop_assign!(MulAssign, mul_assign, Matrix3x4, Matrix4x4, |a, b| {
    *a = (*a).mul(b);
});
