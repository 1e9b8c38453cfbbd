//! Representation of planes.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use orbis_math::{Real, config, vector::Vector3};
use std::fmt;

/// A plane in 3D, represented by the coefficients of the implicit equation
/// `a x + b y + c z + d = 0`.
///
/// The normal `(a, b, c)` need not have unit length. The plane divides space
/// into the positive halfspace, which the normal points into, and the
/// negative halfspace.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Zeroable, Pod)]
pub struct Plane {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    pub d: Real,
}

impl Plane {
    /// The xy-coordinate plane, with the positive halfspace being the space of
    /// positive z-coordinates.
    pub const XY_PLANE: Self = Self::new(0.0, 0.0, 1.0, 0.0);

    /// The yz-coordinate plane, with the positive halfspace being the space of
    /// positive x-coordinates.
    pub const YZ_PLANE: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// The xz-coordinate plane, with the positive halfspace being the space of
    /// positive y-coordinates.
    pub const XZ_PLANE: Self = Self::new(0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: Real, b: Real, c: Real, d: Real) -> Self {
        Self { a, b, c, d }
    }

    /// Creates the plane with the given normal passing through the given
    /// point.
    #[inline]
    pub fn from_normal_and_point(normal: &Vector3, point_in_plane: &Vector3) -> Self {
        Self::new(normal.x, normal.y, normal.z, -normal.dot(point_in_plane))
    }

    /// Returns the normal vector `(a, b, c)`.
    #[inline]
    pub const fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Whether all coefficients are zero within the active tolerance. Such a
    /// plane does not define any geometry.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.abs_diff_eq(&Self::default(), config::tolerance())
    }

    /// Returns the same plane with a unit normal.
    #[inline]
    pub fn normalized(&self) -> Self {
        let inverse_norm = self.normal().norm().recip();
        Self::new(
            self.a * inverse_norm,
            self.b * inverse_norm,
            self.c * inverse_norm,
            self.d * inverse_norm,
        )
    }

    /// Computes the signed distance from the plane to the given point,
    /// positive in the halfspace the normal points into.
    #[inline]
    pub fn signed_distance(&self, point: &Vector3) -> Real {
        let normal = self.normal();
        (normal.dot(point) + self.d) / normal.norm()
    }

    /// Computes the foot of the perpendicular from the given point to the
    /// plane.
    #[inline]
    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        let normal = self.normal();
        point - normal * ((normal.dot(point) + self.d) / normal.norm_squared())
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, config::tolerance())
    }
}

impl AbsDiffEq for Plane {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.a.abs_diff_eq(&other.a, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
            && self.c.abs_diff_eq(&other.c, epsilon)
            && self.d.abs_diff_eq(&other.d, epsilon)
    }
}

impl RelativeEq for Plane {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.a.relative_eq(&other.a, epsilon, max_relative)
            && self.b.relative_eq(&other.b, epsilon, max_relative)
            && self.c.relative_eq(&other.c, epsilon, max_relative)
            && self.d.relative_eq(&other.d, epsilon, max_relative)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PL({},{},{},{})", self.a, self.b, self.c, self.d)
    }
}
