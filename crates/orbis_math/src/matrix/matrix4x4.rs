//! 4x4 matrices.

use super::{Matrix3x3, Matrix4x3, Matrix4x4, multiply, multiply_row};
use crate::{num::Real, vector::Vector4};
use std::ops::Mul;

impl Matrix4x4 {
    /// Returns the 4x3 matrix obtained by dropping the last column.
    #[inline]
    pub fn to_matrix4x3(&self) -> Matrix4x3 {
        Matrix4x3::new(self.ij.map(|[a, b, c, _]| [a, b, c]))
    }

    /// Returns the upper left 3x3 block of the matrix.
    #[inline]
    pub fn upper_left_3x3(&self) -> Matrix3x3 {
        Matrix3x3::new(std::array::from_fn(|i| {
            let [a, b, c, _] = self.ij[i];
            [a, b, c]
        }))
    }

    /// Returns the 3x3 matrix obtained by removing the given row and column.
    pub fn minor(&self, row: usize, column: usize) -> Matrix3x3 {
        Matrix3x3::new(std::array::from_fn(|i| {
            let i = if i < row { i } else { i + 1 };
            std::array::from_fn(|j| {
                let j = if j < column { j } else { j + 1 };
                self.ij[i][j]
            })
        }))
    }

    fn cofactor(&self, row: usize, column: usize) -> Real {
        let sign = if (row + column) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, column).determinant()
    }

    /// Computes the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> Real {
        (0..4).map(|j| self.ij[0][j] * self.cofactor(0, j)).sum()
    }

    /// Whether the matrix has a non-zero determinant.
    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Computes the inverse of the matrix.
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
        nalgebra::Matrix4::<Real>::from(*self)
            .try_inverse()
            .map_or_else(|| self.adjugate() / determinant, Self::from)
    }

    /// Returns the transposed matrix of cofactors.
    pub fn adjugate(&self) -> Self {
        Self::new(std::array::from_fn(|i| {
            std::array::from_fn(|j| self.cofactor(j, i))
        }))
    }
}

impl_binop!(Mul, mul, Matrix4x4, Matrix4x3, Matrix4x3, |a, b| {
    Matrix4x3::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Matrix4x4, Matrix4x4, Matrix4x4, |a, b| {
    Matrix4x4::new(multiply(&a.ij, &b.ij))
});

impl_binop!(Mul, mul, Vector4, Matrix4x4, Vector4, |a, b| {
    Vector4::from_array(multiply_row(&a.to_array(), &b.ij))
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4x4, Matrix4x4, |a, b| {
    *a = (*a).mul(b);
});

impl_binop_assign!(MulAssign, mul_assign, Vector4, Matrix4x4, |a, b| {
    *a = (*a).mul(b);
});

impl From<Matrix4x3> for Matrix4x4 {
    fn from(matrix: Matrix4x3) -> Self {
        matrix.to_matrix4x4()
    }
}

impl From<nalgebra::Matrix4<Real>> for Matrix4x4 {
    fn from(matrix: nalgebra::Matrix4<Real>) -> Self {
        Self::new(std::array::from_fn(|i| std::array::from_fn(|j| matrix[(i, j)])))
    }
}

impl From<Matrix4x4> for nalgebra::Matrix4<Real> {
    fn from(matrix: Matrix4x4) -> Self {
        nalgebra::Matrix4::from_fn(|i, j| matrix.ij[i][j])
    }
}
