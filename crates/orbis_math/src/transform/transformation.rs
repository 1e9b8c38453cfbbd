//! General affine transformation matrices.

use super::{
    AffineHost, RotationMatrix3x3, ScalingMatrix3x3, TranslationMatrix, impl_host_wrapper_traits,
};
use crate::{matrix::Matrix3x3, num::Real, quaternion::Quaternion, vector::Vector3};
use std::ops::{Mul, MulAssign};

/// An affine transformation stored in a host matrix `M` ([`Matrix4x3`] or
/// [`Matrix4x4`]), composed as scaling, then rotation, then translation.
///
/// Decomposition into the three parts assumes positive scale factors. A
/// negative factor is folded into the rotation, which then contains a
/// reflection.
///
/// [`Matrix4x3`]: crate::matrix::Matrix4x3
/// [`Matrix4x4`]: crate::matrix::Matrix4x4
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformationMatrix<M>(M);

impl<M: AffineHost> TransformationMatrix<M> {
    #[inline]
    pub fn identity() -> Self {
        Self(M::identity())
    }

    /// Creates the transformation applying the given scaling, then the given
    /// rotation and finally the given translation.
    pub fn from_parts(
        translation: &TranslationMatrix<M>,
        rotation: &RotationMatrix3x3,
        scaling: &ScalingMatrix3x3,
    ) -> Self {
        Self(M::from_affine_parts(
            &(*scaling * *rotation),
            &translation.displacement(),
        ))
    }

    /// Creates the transformation applying the given per-axis scaling, then
    /// the rotation represented by the given quaternion and finally the
    /// given translation.
    pub fn from_vectors(translation: &Vector3, rotation: &Quaternion, scale: &Vector3) -> Self {
        Self::from_parts(
            &TranslationMatrix::from_vector3(translation),
            &RotationMatrix3x3::from_quaternion(rotation),
            &ScalingMatrix3x3::from_vector3(scale),
        )
    }

    /// Creates a transformation without translation.
    #[inline]
    pub(crate) fn from_linear(linear: &Matrix3x3) -> Self {
        Self(M::from_affine_parts(linear, &Vector3::zeros()))
    }

    /// Wraps the given matrix without checking that it is affine.
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

    /// Splits the transformation into its translation, rotation and scaling.
    ///
    /// The scale factor for each axis is the length of the corresponding row
    /// of the linear part, and the rotation rows are the rows divided by
    /// their scale factor.
    ///
    /// # Panics
    /// Under the panic assertion policy, if a scale factor is zero. When the
    /// failure is ignored, the rotation is non-finite.
    pub fn decompose(&self) -> (TranslationMatrix<M>, RotationMatrix3x3, ScalingMatrix3x3) {
        let (rotation, scaling) = self.decompose_linear();
        (self.translation(), rotation, scaling)
    }

    /// Returns the translation part.
    #[inline]
    pub fn translation(&self) -> TranslationMatrix<M> {
        TranslationMatrix::from_vector3(&self.0.translation_part())
    }

    /// Returns the rotation part. See [`Self::decompose`].
    #[inline]
    pub fn rotation(&self) -> RotationMatrix3x3 {
        self.decompose_linear().0
    }

    /// Returns the scaling part. See [`Self::decompose`].
    #[inline]
    pub fn scaling(&self) -> ScalingMatrix3x3 {
        ScalingMatrix3x3::from_vector3(&self.scale())
    }

    /// Returns the rotation part as a quaternion.
    #[inline]
    pub fn rotation_quaternion(&self) -> Quaternion {
        self.rotation().to_quaternion()
    }

    fn scale(&self) -> Vector3 {
        let linear = self.0.linear_part();
        Vector3::new(
            linear.row(0).norm(),
            linear.row(1).norm(),
            linear.row(2).norm(),
        )
    }

    fn decompose_linear(&self) -> (RotationMatrix3x3, ScalingMatrix3x3) {
        let linear = self.0.linear_part();
        let scale = self.scale();

        math_assert!(
            scale.x != 0.0 && scale.y != 0.0 && scale.z != 0.0,
            "Tried to decompose transformation with zero scale {}",
            scale
        );

        if linear.determinant() < 0.0 {
            log::warn!(
                "Decomposing transformation with negative determinant; \
                 the rotation will contain a reflection"
            );
        }

        let rotation = Matrix3x3::from_rows([
            linear.row(0) / scale.x,
            linear.row(1) / scale.y,
            linear.row(2) / scale.z,
        ]);
        (
            RotationMatrix3x3::unchecked_from_matrix(rotation),
            ScalingMatrix3x3::from_vector3(&scale),
        )
    }

    /// Computes the inverse transformation.
    ///
    /// # Panics
    /// Under the panic assertion policy, if the linear part is singular.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self(self.0.affine_inverse())
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Returns the determinant of the linear part, which equals the
    /// determinant of the full 4x4 transform.
    #[inline]
    pub fn determinant(&self) -> Real {
        self.0.linear_part().determinant()
    }

    #[inline]
    pub fn reset_to_identity(&mut self) {
        *self = Self::identity();
    }

    /// Applies the transformation to the given point.
    #[inline]
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        self.0.transform_point(point)
    }

    /// Applies the linear part of the transformation to the given direction.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.0.transform_vector(vector)
    }

    /// Returns the same transformation stored in another host type.
    #[inline]
    pub fn with_host<N: AffineHost>(&self) -> TransformationMatrix<N> {
        TransformationMatrix(N::from_host(&self.0))
    }
}

impl<M: AffineHost> Default for TransformationMatrix<M> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<M: AffineHost> From<TranslationMatrix<M>> for TransformationMatrix<M> {
    fn from(translation: TranslationMatrix<M>) -> Self {
        Self(translation.into_matrix())
    }
}

impl<M: AffineHost> From<RotationMatrix3x3> for TransformationMatrix<M> {
    fn from(rotation: RotationMatrix3x3) -> Self {
        Self::from_linear(rotation.as_matrix())
    }
}

impl<M: AffineHost> From<ScalingMatrix3x3> for TransformationMatrix<M> {
    fn from(scaling: ScalingMatrix3x3) -> Self {
        Self::from_linear(scaling.as_matrix())
    }
}

impl_host_wrapper_traits!(TransformationMatrix);

impl<M: AffineHost, N: AffineHost> Mul<TransformationMatrix<N>> for TransformationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TransformationMatrix<N>) -> Self::Output {
        TransformationMatrix(self.0.affine_product(&M::from_host(&rhs.0)))
    }
}

impl<M: AffineHost, N: AffineHost> Mul<TranslationMatrix<N>> for TransformationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: TranslationMatrix<N>) -> Self::Output {
        let mut product = self;
        product
            .0
            .set_translation_part(&(self.0.translation_part() + rhs.displacement()));
        product
    }
}

impl<M: AffineHost> Mul<RotationMatrix3x3> for TransformationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: RotationMatrix3x3) -> Self::Output {
        self * TransformationMatrix::<M>::from(rhs)
    }
}

impl<M: AffineHost> Mul<ScalingMatrix3x3> for TransformationMatrix<M> {
    type Output = TransformationMatrix<M>;

    fn mul(self, rhs: ScalingMatrix3x3) -> Self::Output {
        self * TransformationMatrix::<M>::from(rhs)
    }
}

impl<M: AffineHost, N: AffineHost> MulAssign<TransformationMatrix<N>> for TransformationMatrix<M> {
    fn mul_assign(&mut self, rhs: TransformationMatrix<N>) {
        *self = *self * rhs;
    }
}

impl<M: AffineHost, N: AffineHost> MulAssign<TranslationMatrix<N>> for TransformationMatrix<M> {
    fn mul_assign(&mut self, rhs: TranslationMatrix<N>) {
        *self = *self * rhs;
    }
}

impl<M: AffineHost> MulAssign<RotationMatrix3x3> for TransformationMatrix<M> {
    fn mul_assign(&mut self, rhs: RotationMatrix3x3) {
        *self = *self * rhs;
    }
}

impl<M: AffineHost> MulAssign<ScalingMatrix3x3> for TransformationMatrix<M> {
    fn mul_assign(&mut self, rhs: ScalingMatrix3x3) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assertion::catch_assertion,
        matrix::{Matrix4x3, Matrix4x4},
        num::Float,
    };
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    type Transformation43 = TransformationMatrix<Matrix4x3>;
    type Transformation44 = TransformationMatrix<Matrix4x4>;

    fn parts() -> (
        TranslationMatrix<Matrix4x3>,
        RotationMatrix3x3,
        ScalingMatrix3x3,
    ) {
        (
            TranslationMatrix::new(1.0, -2.0, 3.0),
            RotationMatrix3x3::from_euler_angles(0.3, -0.8, 1.9),
            ScalingMatrix3x3::new(2.0, 0.5, 3.0),
        )
    }

    #[test]
    fn composition_applies_scaling_then_rotation_then_translation() {
        let (t, r, s) = parts();
        let tf = Transformation43::from_parts(&t, &r, &s);
        let point = Vector3::new(1.0, 1.0, -1.0);
        let expected = (point * s) * r + t.displacement();
        assert_abs_diff_eq!(tf.transform_point(&point), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(Transformation43::from(s) * r * t, tf, epsilon = 1e-5);
    }

    #[test]
    fn decomposition_recovers_parts() {
        let (t, r, s) = parts();
        let tf = Transformation43::from_parts(&t, &r, &s);
        let (t2, r2, s2) = tf.decompose();
        assert_eq!(t2, t);
        assert_abs_diff_eq!(r2, r, epsilon = 1e-5);
        assert_abs_diff_eq!(s2, s, epsilon = 1e-5);
        assert_abs_diff_eq!(tf.scaling(), s, epsilon = 1e-5);
        assert_abs_diff_eq!(tf.rotation(), r, epsilon = 1e-5);
    }

    #[test]
    fn from_vectors_matches_from_parts() {
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_y(), 0.7);
        let tf = Transformation44::from_vectors(
            &Vector3::new(1.0, 2.0, 3.0),
            &rotation,
            &Vector3::new(2.0, 2.0, 2.0),
        );
        let expected = Transformation44::from_parts(
            &TranslationMatrix::new(1.0, 2.0, 3.0),
            &RotationMatrix3x3::from_quaternion(&rotation),
            &ScalingMatrix3x3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(tf, expected);
        assert_abs_diff_eq!(tf.rotation_quaternion(), rotation, epsilon = 1e-5);
    }

    #[test]
    fn negative_scale_is_decomposed_into_reflecting_rotation() {
        let s = ScalingMatrix3x3::new(-2.0, 3.0, 4.0);
        let t = TranslationMatrix::new(1.0, 2.0, 3.0);
        let tf = Transformation43::from_parts(&t, &RotationMatrix3x3::identity(), &s);
        assert_abs_diff_eq!(tf.determinant(), -24.0, epsilon = 1e-4);

        let (t2, r2, s2) = tf.decompose();
        assert_eq!(t2, t);
        assert_abs_diff_eq!(s2.scale(), Vector3::new(2.0, 3.0, 4.0), epsilon = 1e-5);
        assert_abs_diff_eq!(r2.as_matrix().determinant(), -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(
            Vector3::unit_x() * r2,
            -Vector3::unit_x(),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Transformation43::from_parts(&t2, &r2, &s2),
            tf,
            epsilon = 1e-5
        );
    }

    #[test]
    fn zero_scale_decomposition_fails_assertion() {
        let tf = Transformation43::from(ScalingMatrix3x3::new(1.0, 0.0, 1.0));
        assert!(catch_assertion(|| tf.decompose()).is_err());
        assert!(catch_assertion(|| tf.rotation()).is_err());
    }

    #[test]
    fn inverse_undoes_transformation() {
        let (t, r, s) = parts();
        let tf = Transformation43::from_parts(&t, &r, &s);
        assert!(tf.has_inverse());
        assert_abs_diff_eq!(tf.determinant(), 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(tf * tf.inverted(), Transformation43::identity(), epsilon = 1e-5);
    }

    #[test]
    fn products_with_parts_append_transforms() {
        let (t, r, s) = parts();
        let base = Transformation44::from_parts(&t.with_host(), &r, &s);
        let point = Vector3::new(0.5, -1.0, 2.0);
        let shifted = TranslationMatrix::<Matrix4x3>::new(0.0, 1.0, 0.0);

        assert_abs_diff_eq!(
            (base * shifted).transform_point(&point),
            base.transform_point(&point) + Vector3::new(0.0, 1.0, 0.0),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            (base * r).transform_point(&point),
            base.transform_point(&point) * r,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            (base * s).transform_point(&point),
            base.transform_point(&point) * s,
            epsilon = 1e-5
        );

        let mut accumulated = base;
        accumulated *= shifted;
        accumulated *= r;
        accumulated *= s;
        accumulated *= base.inverted();
        assert_abs_diff_eq!(
            accumulated,
            base * shifted * r * s * base.inverted(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn transformation_products_do_not_commute() {
        let r = Transformation43::from(RotationMatrix3x3::from_axis_angle(
            &Vector3::unit_z(),
            Real::FRAC_PI_2,
        ));
        let t = Transformation43::from(TranslationMatrix::new(1.0, 0.0, 0.0));
        assert_ne!(r * t, t * r);
    }

    #[test]
    fn rotation_and_scaling_prefix_products() {
        let (t, r, s) = parts();
        let base = Transformation43::from(t);
        assert_eq!(r * base, Transformation43::from(r) * base);
        assert_eq!(s * base, Transformation43::from(s) * base);
        assert_eq!(t * base, Transformation43::from(t) * base);
    }

    #[test]
    fn reset_to_identity_clears_transformation() {
        let (t, r, s) = parts();
        let mut tf = Transformation43::from_parts(&t, &r, &s);
        tf.reset_to_identity();
        assert!(tf.as_matrix().is_identity());
    }

    prop_compose! {
        fn transformation_strategy()(
            displacement in prop::array::uniform3(-10.0 as Real..10.0),
            angles in prop::array::uniform3(-3.0 as Real..3.0),
            scale in prop::array::uniform3(0.2 as Real..5.0),
        ) -> Transformation43 {
            Transformation43::from_parts(
                &TranslationMatrix::from_vector3(&Vector3::from_array(displacement)),
                &RotationMatrix3x3::from_euler_angles(angles[0], angles[1], angles[2]),
                &ScalingMatrix3x3::from_vector3(&Vector3::from_array(scale)),
            )
        }
    }

    proptest! {
        #[test]
        fn decomposition_round_trips(tf in transformation_strategy()) {
            let (t, r, s) = tf.decompose();
            prop_assert!(approx::abs_diff_eq!(
                Transformation43::from_parts(&t, &r, &s),
                tf,
                epsilon = 1e-3
            ));
        }

        #[test]
        fn inverse_undoes_point_transform(
            tf in transformation_strategy(),
            point in prop::array::uniform3(-10.0 as Real..10.0),
        ) {
            let point = Vector3::from_array(point);
            let back = tf.inverted().transform_point(&tf.transform_point(&point));
            prop_assert!(approx::abs_diff_eq!(back, point, epsilon = 1e-3));
        }
    }
}
