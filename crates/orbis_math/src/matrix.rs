//! Matrices.
//!
//! All matrices are stored row by row and act on row vectors from the
//! right, so a vector `v` is transformed as `v * M` and the product `A * B`
//! applies `A` first.

mod matrix3x3;
mod matrix3x4;
mod matrix4x3;
mod matrix4x4;

use crate::{
    num::Real,
    vector::{Vector3, Vector4},
};

#[cfg(test)]
pub(crate) use test_util::*;

/// A 3x3 matrix.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Matrix3x3 {
    /// The elements, indexed as `ij[row][column]`.
    pub ij: [[Real; 3]; 3],
}

/// A 3x4 matrix.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Matrix3x4 {
    /// The elements, indexed as `ij[row][column]`.
    pub ij: [[Real; 4]; 3],
}

/// A 4x3 matrix.
///
/// When used as an affine transform, the upper 3x3 block holds the linear
/// part and the last row the translation, with an implied fourth column of
/// `(0, 0, 0, 1)`.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Matrix4x3 {
    /// The elements, indexed as `ij[row][column]`.
    pub ij: [[Real; 3]; 4],
}

/// A 4x4 matrix.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Matrix4x4 {
    /// The elements, indexed as `ij[row][column]`.
    pub ij: [[Real; 4]; 4],
}

/// Generates the storage, element-wise arithmetic, comparison and
/// formatting shared by all matrix types.
macro_rules! impl_matrix {
    (
        $t:ident,
        $rows:literal x $cols:literal,
        $tag:literal,
        row: $row:ident,
        column: $col:ident,
        transposed: $tt:ident
    ) => {
        impl $t {
            /// Creates a matrix with the given elements, indexed as
            /// `ij[row][column]`.
            #[inline]
            pub const fn new(ij: [[Real; $cols]; $rows]) -> Self {
                Self { ij }
            }

            /// Creates a matrix with all zeros.
            #[inline]
            pub const fn zeros() -> Self {
                Self::from_value(0.0)
            }

            /// Creates a matrix with every element set to the given value.
            #[inline]
            pub const fn from_value(value: Real) -> Self {
                Self::new([[value; $cols]; $rows])
            }

            /// Creates a matrix with ones on the main diagonal and zeros
            /// elsewhere.
            #[inline]
            pub const fn identity() -> Self {
                let mut ij = [[0.0; $cols]; $rows];
                let mut i = 0;
                while i < $rows && i < $cols {
                    ij[i][i] = 1.0;
                    i += 1;
                }
                Self::new(ij)
            }

            /// Creates a matrix from the given row vectors.
            #[inline]
            pub fn from_rows(rows: [$row; $rows]) -> Self {
                Self::new(rows.map(|row| row.to_array()))
            }

            /// Creates a matrix from a row-major slice of elements.
            ///
            /// # Panics
            /// Under the panic assertion policy, if the slice does not hold
            /// exactly as many elements as the matrix. When the failure is
            /// ignored, the available elements are used and the rest are zero.
            pub fn from_slice(values: &[Real]) -> Self {
                math_assert!(
                    values.len() == $rows * $cols,
                    "{} requires {} elements, got {}",
                    stringify!($t),
                    $rows * $cols,
                    values.len()
                );
                let mut matrix = Self::zeros();
                for (element, value) in matrix.as_mut_slice().iter_mut().zip(values) {
                    *element = *value;
                }
                matrix
            }

            /// Returns a row-major view of the elements.
            #[inline]
            pub fn as_slice(&self) -> &[Real] {
                bytemuck::cast_slice(self.ij.as_slice())
            }

            /// Returns a mutable row-major view of the elements.
            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [Real] {
                bytemuck::cast_slice_mut(self.ij.as_mut_slice())
            }

            /// Returns the given row as a vector.
            #[inline]
            pub fn row(&self, i: usize) -> $row {
                $row::from_array(self.ij[i])
            }

            /// Overwrites the given row with the components of the vector.
            #[inline]
            pub fn set_row(&mut self, i: usize, row: &$row) {
                self.ij[i] = row.to_array();
            }

            /// Returns the given column as a vector.
            #[inline]
            pub fn column(&self, j: usize) -> $col {
                $col::from_array(std::array::from_fn(|i| self.ij[i][j]))
            }

            #[inline]
            pub fn reset_to_zero(&mut self) {
                *self = Self::zeros();
            }

            #[inline]
            pub fn reset_to_identity(&mut self) {
                *self = Self::identity();
            }

            /// Whether every element is zero within the active tolerance.
            #[inline]
            pub fn is_zero(&self) -> bool {
                *self == Self::zeros()
            }

            /// Whether the matrix equals [`Self::identity`] within the active
            /// tolerance.
            #[inline]
            pub fn is_identity(&self) -> bool {
                *self == Self::identity()
            }

            /// Returns the transpose of the matrix.
            #[inline]
            pub fn transposed(&self) -> $tt {
                $tt::new(std::array::from_fn(|j| std::array::from_fn(|i| self.ij[i][j])))
            }

            /// Applies the given function to each element.
            #[inline]
            pub fn mapped(&self, mut f: impl FnMut(Real) -> Real) -> Self {
                Self::new(self.ij.map(|row| row.map(&mut f)))
            }

            #[inline]
            fn zip_map(&self, other: &Self, f: impl Fn(Real, Real) -> Real) -> Self {
                Self::new(std::array::from_fn(|i| {
                    std::array::from_fn(|j| f(self.ij[i][j], other.ij[i][j]))
                }))
            }
        }

        impl_binop!(Add, add, $t, $t, $t, |a, b| { a.zip_map(b, |x, y| x + y) });

        impl_binop!(Sub, sub, $t, $t, $t, |a, b| { a.zip_map(b, |x, y| x - y) });

        impl_binop!(Mul, mul, $t, Real, $t, |a, b| { a.mapped(|x| x * *b) });

        impl_binop!(Mul, mul, Real, $t, $t, |a, b| { b.mapped(|x| *a * x) });

        impl_binop!(Div, div, $t, Real, $t, |a, b| { a.mapped(|x| x / *b) });

        impl_binop_assign!(AddAssign, add_assign, $t, $t, |a, b| {
            *a = &*a + b;
        });

        impl_binop_assign!(SubAssign, sub_assign, $t, $t, |a, b| {
            *a = &*a - b;
        });

        impl_binop_assign!(MulAssign, mul_assign, $t, Real, |a, b| {
            *a = &*a * b;
        });

        impl_binop_assign!(DivAssign, div_assign, $t, Real, |a, b| {
            *a = &*a / b;
        });

        impl_unary_op!(Neg, neg, $t, $t, |val| { val.mapped(|x| -x) });

        impl ::std::ops::Index<(usize, usize)> for $t {
            type Output = Real;

            #[inline]
            fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
                &self.ij[i][j]
            }
        }

        impl ::std::ops::IndexMut<(usize, usize)> for $t {
            #[inline]
            fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
                &mut self.ij[i][j]
            }
        }

        impl_tolerant_eq!($t);

        impl_abs_diff_eq!($t, |a, b, epsilon| {
            a.as_slice()
                .iter()
                .zip(b.as_slice())
                .all(|(x, y)| ::approx::AbsDiffEq::abs_diff_eq(x, y, epsilon))
        });

        impl_relative_eq!($t, |a, b, epsilon, max_relative| {
            a.as_slice()
                .iter()
                .zip(b.as_slice())
                .all(|(x, y)| ::approx::RelativeEq::relative_eq(x, y, epsilon, max_relative))
        });

        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($tag, "("))?;
                $crate::vector::write_separated(f, self.as_slice())?;
                write!(f, ")")
            }
        }
    };
}

impl_matrix!(Matrix3x3, 3 x 3, "M3x3", row: Vector3, column: Vector3, transposed: Matrix3x3);
impl_matrix!(Matrix3x4, 3 x 4, "M3x4", row: Vector4, column: Vector3, transposed: Matrix4x3);
impl_matrix!(Matrix4x3, 4 x 3, "M4x3", row: Vector3, column: Vector4, transposed: Matrix3x4);
impl_matrix!(Matrix4x4, 4 x 4, "M4x4", row: Vector4, column: Vector4, transposed: Matrix4x4);

/// Computes the product of an `M`x`K` and a `K`x`N` matrix.
#[inline]
pub(crate) fn multiply<const M: usize, const K: usize, const N: usize>(
    a: &[[Real; K]; M],
    b: &[[Real; N]; K],
) -> [[Real; N]; M] {
    std::array::from_fn(|i| std::array::from_fn(|j| (0..K).map(|k| a[i][k] * b[k][j]).sum()))
}

/// Computes the product of a `K`-dimensional row vector and a `K`x`N`
/// matrix.
#[inline]
pub(crate) fn multiply_row<const K: usize, const N: usize>(
    v: &[Real; K],
    m: &[[Real; N]; K],
) -> [Real; N] {
    std::array::from_fn(|j| (0..K).map(|k| v[k] * m[k][j]).sum())
}

#[cfg(test)]
mod test_util {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        pub(crate) fn element_strategy()(value in -10.0 as Real..10.0) -> Real {
            value
        }
    }

    prop_compose! {
        pub(crate) fn matrix3x3_strategy()(
            ij in prop::array::uniform3(prop::array::uniform3(element_strategy()))
        ) -> Matrix3x3 {
            Matrix3x3::new(ij)
        }
    }

    prop_compose! {
        pub(crate) fn matrix4x3_strategy()(
            ij in prop::array::uniform4(prop::array::uniform3(element_strategy()))
        ) -> Matrix4x3 {
            Matrix4x3::new(ij)
        }
    }

    prop_compose! {
        pub(crate) fn matrix4x4_strategy()(
            ij in prop::array::uniform4(prop::array::uniform4(element_strategy()))
        ) -> Matrix4x4 {
            Matrix4x4::new(ij)
        }
    }
}
