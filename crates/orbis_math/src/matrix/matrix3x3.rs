//! 3x3 matrices.

use super::{Matrix3x3, Matrix3x4, multiply, multiply_row};
use crate::{num::Real, vector::Vector3};
use std::ops::Mul;

impl Matrix3x3 {
    /// Creates a diagonal matrix with the given diagonal elements.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector3) -> Self {
        Self::new([
            [diagonal.x, 0.0, 0.0],
            [0.0, diagonal.y, 0.0],
            [0.0, 0.0, diagonal.z],
        ])
    }

    /// Returns the diagonal elements as a vector.
    #[inline]
    pub fn diagonal(&self) -> Vector3 {
        Vector3::new(self.ij[0][0], self.ij[1][1], self.ij[2][2])
    }

    #[inline]
    pub fn trace(&self) -> Real {
        self.ij[0][0] + self.ij[1][1] + self.ij[2][2]
    }

    pub fn determinant(&self) -> Real {
        let m = &self.ij;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Whether the matrix has a non-zero determinant.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Computes the inverse of the matrix from its adjugate.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the matrix is singular. When the
    /// failure is ignored, the result is non-finite.
    pub fn inverted(&self) -> Self {
        let determinant = self.determinant();
        math_assert!(
            determinant != 0.0,
            "Tried to invert singular matrix {}",
            self
        );
        let m = &self.ij;
        let adjugate = Self::new([
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ]);
        adjugate / determinant
    }
}

impl_binop!(Mul, mul, Matrix3x3, Matrix3x3, Matrix3x3, |a, b| {
    Matrix3x3::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Matrix3x3, Matrix3x4, Matrix3x4, |a, b| {
    Matrix3x4::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Vector3, Matrix3x3, Vector3, |a, b| {
    Vector3::from_array(multiply_row(&a.to_array(), &b.ij))
});

impl_binop_assign!(MulAssign, mul_assign, Matrix3x3, Matrix3x3, |a, b| {
    *a = (*a).mul(b);
});

impl_binop_assign!(MulAssign, mul_assign, Vector3, Matrix3x3, |a, b| {
    *a = (*a).mul(b);
});

impl From<nalgebra::Matrix3<Real>> for Matrix3x3 {
    fn from(matrix: nalgebra::Matrix3<Real>) -> Self {
        Self::new(std::array::from_fn(|i| std::array::from_fn(|j| matrix[(i, j)])))
    }
}

impl From<Matrix3x3> for nalgebra::Matrix3<Real> {
    fn from(matrix: Matrix3x3) -> Self {
        nalgebra::Matrix3::from_fn(|i, j| matrix.ij[i][j])
    }
}
