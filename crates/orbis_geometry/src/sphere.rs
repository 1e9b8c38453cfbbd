//! Representation of spheres.

use crate::Plane;
use approx::AbsDiffEq;
use orbis_math::{
    Real, config, math_assert,
    quaternion::Quaternion,
    transform::{
        AffineHost, RotationMatrix3x3, ScalingMatrix3x3, SpaceConversionMatrix,
        TransformationMatrix, TranslationMatrix,
    },
    vector::{Vector3, Vector4},
};
use std::fmt;

/// A vector type that can serve as the center of a [`Sphere`].
///
/// Transforms act on the 3D position of the point. Any additional components
/// are carried through unchanged.
pub trait SpherePoint: Copy + fmt::Debug + PartialEq + AbsDiffEq<Epsilon = Real> {
    /// The point at the origin.
    fn origin() -> Self;

    /// Returns the 3D position of the point.
    fn position(&self) -> Vector3;

    /// Returns the point moved to the given 3D position.
    fn with_position(&self, position: &Vector3) -> Self;

    /// Returns the point converted by the given space conversion matrix.
    fn converted(&self, conversion: &SpaceConversionMatrix) -> Self;

    /// Returns all components of the point.
    fn components(&self) -> &[Real];
}

impl SpherePoint for Vector3 {
    fn origin() -> Self {
        Vector3::zeros()
    }

    fn position(&self) -> Vector3 {
        *self
    }

    fn with_position(&self, position: &Vector3) -> Self {
        *position
    }

    /// The converted point is divided by its homogeneous coordinate.
    fn converted(&self, conversion: &SpaceConversionMatrix) -> Self {
        conversion.transform_point(self)
    }

    fn components(&self) -> &[Real] {
        self.as_slice()
    }
}

/// The w-component is treated as a homogeneous coordinate, so the origin has
/// `w = 1`.
impl SpherePoint for Vector4 {
    fn origin() -> Self {
        Vector4::unit_w()
    }

    fn position(&self) -> Vector3 {
        self.xyz()
    }

    fn with_position(&self, position: &Vector3) -> Self {
        position.extended(self.w)
    }

    /// The converted point is not divided by its homogeneous coordinate.
    fn converted(&self, conversion: &SpaceConversionMatrix) -> Self {
        conversion.transform_vector4(self)
    }

    fn components(&self) -> &[Real] {
        self.as_slice()
    }
}

/// How a sphere is positioned relative to a plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpaceRelation {
    /// The sphere lies entirely in the negative halfspace of the plane.
    NegativeSide,
    /// The sphere lies entirely in the positive halfspace of the plane.
    PositiveSide,
    /// The sphere intersects the plane.
    BothSides,
}

/// A sphere represented by its center point and radius.
///
/// The radius is not required to be non-negative.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct Sphere<V> {
    center: V,
    radius: Real,
}

impl<V: SpherePoint> Sphere<V> {
    /// Creates a new sphere with the given center and radius.
    #[inline]
    pub const fn new(center: V, radius: Real) -> Self {
        Self { center, radius }
    }

    /// Creates the sphere with unit radius centered at the origin.
    #[inline]
    pub fn unit() -> Self {
        Self::new(V::origin(), 1.0)
    }

    #[inline]
    pub const fn center(&self) -> &V {
        &self.center
    }

    #[inline]
    pub const fn radius(&self) -> Real {
        self.radius
    }

    /// Whether the given point is inside this sphere. A point exactly on the
    /// surface is considered inside.
    #[inline]
    pub fn contains_point(&self, point: &V) -> bool {
        (point.position() - self.center.position()).norm_squared() <= self.radius * self.radius
    }

    /// Whether the given sphere overlaps or touches this sphere.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Self) -> bool {
        let distance = (sphere.center.position() - self.center.position()).norm();
        distance <= self.radius.abs() + sphere.radius.abs()
    }

    /// Returns the sphere moved by the given displacement.
    #[inline]
    pub fn translated(&self, displacement: &Vector3) -> Self {
        self.with_center_position(self.center.position() + displacement)
    }

    /// Returns the sphere moved by the given translation.
    #[inline]
    pub fn translated_by<M: AffineHost>(&self, translation: &TranslationMatrix<M>) -> Self {
        self.with_center_position(translation.transform_point(&self.center.position()))
    }

    /// Returns the sphere rotated about the origin.
    #[inline]
    pub fn rotated(&self, rotation: &RotationMatrix3x3) -> Self {
        self.with_center_position(self.center.position() * rotation)
    }

    /// Returns the sphere rotated about the given pivot point.
    #[inline]
    pub fn rotated_with_pivot(&self, rotation: &RotationMatrix3x3, pivot: &Vector3) -> Self {
        self.about_pivot(pivot, 1.0, |position| position * rotation)
    }

    /// Returns the sphere rotated about the origin by the given unit
    /// quaternion.
    #[inline]
    pub fn rotated_by_quaternion(&self, rotation: &Quaternion) -> Self {
        self.with_center_position(rotation.rotate_vector3(&self.center.position()))
    }

    /// Returns the sphere rotated about the given pivot point by the given
    /// unit quaternion.
    #[inline]
    pub fn rotated_by_quaternion_with_pivot(&self, rotation: &Quaternion, pivot: &Vector3) -> Self {
        self.about_pivot(pivot, 1.0, |position| rotation.rotate_vector3(&position))
    }

    /// Returns the sphere with the center coordinates scaled by the given
    /// per-axis factors and the radius scaled by `radius_scale`.
    #[inline]
    pub fn scaled(&self, scale: &Vector3, radius_scale: Real) -> Self {
        Self::new(
            self.center
                .with_position(&self.center.position().component_mul(scale)),
            self.radius * radius_scale,
        )
    }

    /// Like [`Self::scaled`], scaling relative to the given pivot point.
    #[inline]
    pub fn scaled_with_pivot(&self, scale: &Vector3, radius_scale: Real, pivot: &Vector3) -> Self {
        self.about_pivot(pivot, radius_scale, |position| position.component_mul(scale))
    }

    /// Like [`Self::scaled`], with the per-axis factors given by a scaling
    /// matrix.
    #[inline]
    pub fn scaled_by(&self, scaling: &ScalingMatrix3x3, radius_scale: Real) -> Self {
        self.scaled(&scaling.scale(), radius_scale)
    }

    /// Like [`Self::scaled_by`], scaling relative to the given pivot point.
    #[inline]
    pub fn scaled_by_with_pivot(
        &self,
        scaling: &ScalingMatrix3x3,
        radius_scale: Real,
        pivot: &Vector3,
    ) -> Self {
        self.scaled_with_pivot(&scaling.scale(), radius_scale, pivot)
    }

    /// Returns the sphere with the center transformed as a point and the
    /// radius scaled by `radius_scale`.
    #[inline]
    pub fn transformed<M: AffineHost>(
        &self,
        transformation: &TransformationMatrix<M>,
        radius_scale: Real,
    ) -> Self {
        Self::new(
            self.center
                .with_position(&transformation.transform_point(&self.center.position())),
            self.radius * radius_scale,
        )
    }

    /// Like [`Self::transformed`], transforming relative to the given pivot
    /// point.
    #[inline]
    pub fn transformed_with_pivot<M: AffineHost>(
        &self,
        transformation: &TransformationMatrix<M>,
        radius_scale: Real,
        pivot: &Vector3,
    ) -> Self {
        self.about_pivot(pivot, radius_scale, |position| {
            transformation.transform_point(&position)
        })
    }

    /// Returns the sphere with the center converted by the given space
    /// conversion matrix. The radius is unchanged.
    #[inline]
    pub fn transformed_by_space_conversion(&self, conversion: &SpaceConversionMatrix) -> Self {
        Self::new(self.center.converted(conversion), self.radius)
    }

    /// Determines how the sphere is positioned relative to the given plane.
    /// Touching the plane counts as lying on one side.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the plane is null or the radius
    /// is zero.
    pub fn space_relation(&self, plane: &Plane) -> SpaceRelation {
        self.assert_valid_plane_query(plane);

        let signed_distance = plane.signed_distance(&self.center.position());

        if signed_distance.abs() < self.radius.abs() {
            SpaceRelation::BothSides
        } else if signed_distance < 0.0 {
            SpaceRelation::NegativeSide
        } else {
            SpaceRelation::PositiveSide
        }
    }

    /// Returns the sphere with the center moved to its orthogonal projection
    /// onto the given plane. The radius is unchanged.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the plane is null or the radius
    /// is zero.
    pub fn project_to_plane(&self, plane: &Plane) -> Self {
        self.assert_valid_plane_query(plane);
        self.with_center_position(plane.project_point(&self.center.position()))
    }

    fn assert_valid_plane_query(&self, plane: &Plane) {
        math_assert!(
            !plane.is_zero(),
            "Tried to relate sphere to null plane {}",
            plane
        );
        math_assert!(
            self.radius != 0.0,
            "Tried to relate sphere with zero radius to plane {}",
            plane
        );
    }

    fn with_center_position(&self, position: Vector3) -> Self {
        Self::new(self.center.with_position(&position), self.radius)
    }

    fn about_pivot(
        &self,
        pivot: &Vector3,
        radius_scale: Real,
        transform: impl FnOnce(Vector3) -> Vector3,
    ) -> Self {
        let relative_position = self.center.position() - pivot;
        Self::new(
            self.center
                .with_position(&(transform(relative_position) + pivot)),
            self.radius * radius_scale,
        )
    }
}

impl<V: SpherePoint> PartialEq for Sphere<V> {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, config::tolerance())
    }
}

impl<V: SpherePoint> AbsDiffEq for Sphere<V> {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.radius.abs_diff_eq(&other.radius, epsilon)
    }
}

impl<V: SpherePoint> fmt::Display for Sphere<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SP(c(")?;
        for (idx, component) in self.center.components().iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, "),{})", self.radius)
    }
}
