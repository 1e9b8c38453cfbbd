//! Vectors.

use crate::{config, num::Real};
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A 2-dimensional vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Zeroable, Pod)]
pub struct Vector2 {
    pub x: Real,
    pub y: Real,
}

/// A 3-dimensional vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Zeroable, Pod)]
pub struct Vector3 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

/// A 4-dimensional vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Zeroable, Pod)]
pub struct Vector4 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

/// Generates the operations shared by all vector types.
macro_rules! impl_vector {
    ($t:ident, $n:literal, $tag:literal, [$($field:ident),+]) => {
        impl $t {
            /// Creates a new vector with the given components.
            #[inline]
            pub const fn new($($field: Real),+) -> Self {
                Self { $($field),+ }
            }

            /// Creates a new vector with all zeros.
            #[inline]
            pub const fn zeros() -> Self {
                Self::same(0.0)
            }

            /// Creates a new vector with the same value for every component.
            #[inline]
            pub const fn same(value: Real) -> Self {
                Self { $($field: value),+ }
            }

            /// Creates a vector from the given array of components.
            #[inline]
            pub const fn from_array([$($field),+]: [Real; $n]) -> Self {
                Self { $($field),+ }
            }

            /// Returns the components as an array.
            #[inline]
            pub const fn to_array(&self) -> [Real; $n] {
                [$(self.$field),+]
            }

            /// Returns a view of the components as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[Real] {
                bytemuck::cast_slice(std::slice::from_ref(self))
            }

            /// Computes the dot product of this and the given vector.
            #[inline]
            pub fn dot(&self, other: &Self) -> Real {
                0.0 $(+ self.$field * other.$field)+
            }

            #[inline]
            pub fn norm_squared(&self) -> Real {
                self.dot(self)
            }

            #[inline]
            pub fn norm(&self) -> Real {
                self.norm_squared().sqrt()
            }

            /// Returns the vector scaled to unit length. A zero vector gives
            /// non-finite components.
            #[inline]
            pub fn normalized(&self) -> Self {
                self / self.norm()
            }

            /// Whether every component is zero within the active tolerance.
            #[inline]
            pub fn is_zero(&self) -> bool {
                self.abs_diff_eq(&Self::zeros(), config::tolerance())
            }

            /// Computes the component-wise product of this and the given
            /// vector.
            #[inline]
            pub fn component_mul(&self, other: &Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }

            /// Applies the given function to each component.
            #[inline]
            pub fn mapped(&self, mut f: impl FnMut(Real) -> Real) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            /// Linearly interpolates between `a` (for `t = 0`) and `b` (for
            /// `t = 1`).
            #[inline]
            pub fn lerp(a: &Self, b: &Self, t: Real) -> Self {
                Self { $($field: a.$field + (b.$field - a.$field) * t),+ }
            }
        }

        impl_binop!(Add, add, $t, $t, $t, |a, b| {
            $t { $($field: a.$field + b.$field),+ }
        });

        impl_binop!(Sub, sub, $t, $t, $t, |a, b| {
            $t { $($field: a.$field - b.$field),+ }
        });

        impl_binop!(Mul, mul, $t, Real, $t, |a, b| {
            $t { $($field: a.$field * *b),+ }
        });

        impl_binop!(Mul, mul, Real, $t, $t, |a, b| { b * *a });

        impl_binop!(Div, div, $t, Real, $t, |a, b| {
            $t { $($field: a.$field / *b),+ }
        });

        impl_binop_assign!(AddAssign, add_assign, $t, $t, |a, b| {
            $(a.$field += b.$field;)+
        });

        impl_binop_assign!(SubAssign, sub_assign, $t, $t, |a, b| {
            $(a.$field -= b.$field;)+
        });

        impl_binop_assign!(MulAssign, mul_assign, $t, Real, |a, b| {
            $(a.$field *= *b;)+
        });

        impl_binop_assign!(DivAssign, div_assign, $t, Real, |a, b| {
            $(a.$field /= *b;)+
        });

        impl_unary_op!(Neg, neg, $t, $t, |val| {
            $t { $($field: -val.$field),+ }
        });

        impl Index<usize> for $t {
            type Output = Real;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        impl IndexMut<usize> for $t {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut bytemuck::cast_slice_mut::<_, Real>(std::slice::from_mut(self))[index]
            }
        }

        impl From<[Real; $n]> for $t {
            fn from(array: [Real; $n]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<$t> for [Real; $n] {
            fn from(vector: $t) -> Self {
                vector.to_array()
            }
        }

        impl_tolerant_eq!($t);

        impl_abs_diff_eq!($t, |a, b, epsilon| {
            true $(&& a.$field.abs_diff_eq(&b.$field, epsilon))+
        });

        impl_relative_eq!($t, |a, b, epsilon, max_relative| {
            true $(&& ::approx::RelativeEq::relative_eq(&a.$field, &b.$field, epsilon, max_relative))+
        });

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "("))?;
                write_separated(f, &self.to_array())?;
                write!(f, ")")
            }
        }
    };
}

impl_vector!(Vector2, 2, "V2", [x, y]);
impl_vector!(Vector3, 3, "V3", [x, y, z]);
impl_vector!(Vector4, 4, "V4", [x, y, z, w]);

impl Vector2 {
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Creates a 3-dimensional vector with the given z-component.
    #[inline]
    pub const fn extended(&self, z: Real) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }
}

impl Vector3 {
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Creates a 4-dimensional vector with the given w-component.
    #[inline]
    pub const fn extended(&self, w: Real) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Computes the cross product of this and the given vector.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Vector4 {
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    #[inline]
    pub const fn unit_w() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the first three components, dropping w.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<nalgebra::Vector3<Real>> for Vector3 {
    fn from(vector: nalgebra::Vector3<Real>) -> Self {
        Self::new(vector.x, vector.y, vector.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<Real> {
    fn from(vector: Vector3) -> Self {
        nalgebra::Vector3::new(vector.x, vector.y, vector.z)
    }
}

/// Writes the given values separated by commas without spaces, each in the
/// shortest `Display` form of [`Real`].
pub(crate) fn write_separated(f: &mut fmt::Formatter<'_>, values: &[Real]) -> fmt::Result {
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            write!(f, ",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn vector_display_formats_are_compact() {
        assert_eq!(Vector2::new(1.0, -2.5).to_string(), "V2(1,-2.5)");
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).to_string(), "V3(1,2,3)");
        assert_eq!(Vector4::new(0.5, 0.0, -1.0, 4.0).to_string(), "V4(0.5,0,-1,4)");
    }

    #[test]
    fn vector_arithmetic_works() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-1.0, 0.5, 2.0);
        assert_abs_diff_eq!(a + b, Vector3::new(0.0, 2.5, 5.0));
        assert_abs_diff_eq!(a - b, Vector3::new(2.0, 1.5, 1.0));
        assert_abs_diff_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_abs_diff_eq!(2.0 * a, Vector3::new(2.0, 4.0, 6.0));
        approx::assert_relative_eq!(3.0 * a, Vector3::new(3.0, 6.0, 9.0));
        assert_abs_diff_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_abs_diff_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c *= 2.0;
        c -= a;
        c /= 1.0;
        assert_abs_diff_eq!(c, Vector3::new(-1.0, 3.0, 7.0));
    }

    #[test]
    fn cross_product_follows_right_hand_rule_for_unit_axes() {
        assert_abs_diff_eq!(
            Vector3::unit_x().cross(&Vector3::unit_y()),
            Vector3::unit_z()
        );
        assert_abs_diff_eq!(
            Vector3::unit_y().cross(&Vector3::unit_z()),
            Vector3::unit_x()
        );
    }

    #[test]
    fn vector_equality_uses_tolerance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(a, Vector3::new(1.0 + 1e-6, 2.0, 3.0 - 1e-6));
        assert_ne!(a, Vector3::new(1.1, 2.0, 3.0));
        assert!(Vector4::new(1e-7, 0.0, -1e-7, 0.0).is_zero());
    }

    #[test]
    fn indexing_follows_component_order() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_abs_diff_eq!(v[3], 4.0);
        v[1] = 7.0;
        assert_abs_diff_eq!(v.y, 7.0);
        assert_eq!(v.as_slice().len(), 4);
    }

    #[test]
    fn extending_and_truncating_preserves_components() {
        let v = Vector2::new(1.0, 2.0).extended(3.0).extended(4.0);
        assert_abs_diff_eq!(v, Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_abs_diff_eq!(v.xyz().xy(), Vector2::new(1.0, 2.0));
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Vector2::new(0.0, 1.0);
        let b = Vector2::new(4.0, -1.0);
        assert_abs_diff_eq!(Vector2::lerp(&a, &b, 0.0), a);
        assert_abs_diff_eq!(Vector2::lerp(&a, &b, 1.0), b);
        assert_abs_diff_eq!(Vector2::lerp(&a, &b, 0.5), Vector2::new(2.0, 0.0));
    }

    proptest! {
        #[test]
        fn normalized_vector_has_unit_norm(
            x in -1e3 as Real..1e3,
            y in -1e3 as Real..1e3,
            z in 1.0 as Real..1e3,
        ) {
            let v = Vector3::new(x, y, z).normalized();
            prop_assert!((v.norm() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn cross_product_is_perpendicular(
            a in prop::array::uniform3(-10.0 as Real..10.0),
            b in prop::array::uniform3(-10.0 as Real..10.0),
        ) {
            let a = Vector3::from_array(a);
            let b = Vector3::from_array(b);
            let c = a.cross(&b);
            prop_assert!(c.dot(&a).abs() < 5e-2);
            prop_assert!(c.dot(&b).abs() < 5e-2);
        }
    }
}
