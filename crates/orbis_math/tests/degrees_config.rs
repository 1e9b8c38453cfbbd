//! Angle handling when the process is configured to use degrees.

use approx::assert_abs_diff_eq;
use orbis_math::{
    AngleUnit, MathConfig, config,
    quaternion::Quaternion,
    transform::{RotationMatrix3x3, SpaceConversionMatrix},
    vector::Vector3,
};
use std::sync::Once;

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        config::initialize(MathConfig {
            angle_unit: AngleUnit::Degrees,
            ..Default::default()
        })
        .unwrap();
    });
}

#[test]
fn configured_unit_is_degrees() {
    init();
    assert_eq!(config::angle_unit(), AngleUnit::Degrees);
    assert!(config::initialize(MathConfig::default()).is_err());
}

#[test]
fn euler_angles_in_degrees_round_trip() {
    init();
    let matrix = RotationMatrix3x3::from_euler_angles(45.0, 60.0, 90.0);
    let quaternion = matrix.to_quaternion();
    let (x, y, z) = quaternion.to_euler_angles();

    assert_abs_diff_eq!(x, 45.0, epsilon = 1e-2);
    assert_abs_diff_eq!(y, 60.0, epsilon = 1e-2);
    assert_abs_diff_eq!(z, 90.0, epsilon = 1e-2);

    let v = Vector3::new(1.0, 2.0, 3.0);
    assert_abs_diff_eq!(
        v * RotationMatrix3x3::from_euler_angles(x, y, z),
        v * matrix,
        epsilon = 1e-4
    );
    assert_abs_diff_eq!(quaternion.rotate_vector3(&v), v * matrix, epsilon = 1e-4);
}

#[test]
fn axis_angle_uses_degrees() {
    init();
    let q = Quaternion::from_axis_angle(&Vector3::unit_z(), 90.0);
    assert_abs_diff_eq!(
        q.rotate_vector3(&Vector3::unit_x()),
        Vector3::unit_y(),
        epsilon = 1e-6
    );

    let (axis, angle) = RotationMatrix3x3::from_axis_angle(&Vector3::unit_z(), 90.0).to_axis_angle();
    assert_abs_diff_eq!(axis, Vector3::unit_z(), epsilon = 1e-5);
    assert_abs_diff_eq!(angle, 90.0, epsilon = 1e-3);
    assert_abs_diff_eq!(q.angle(), 90.0, epsilon = 1e-3);
}

#[test]
fn perspective_field_of_view_uses_degrees() {
    init();
    let in_degrees = SpaceConversionMatrix::perspective_fov_lh(90.0, 1.0, 1.0, 10.0);
    let edge = in_degrees.transform_point(&Vector3::new(2.0, 2.0, 2.0));
    assert_abs_diff_eq!(edge.x, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(edge.y, 1.0, epsilon = 1e-5);
}
