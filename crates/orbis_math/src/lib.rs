//! Vectors, matrices, quaternions and affine transforms using the row-vector
//! convention.

#[macro_use]
mod macros;

pub mod angle;
pub mod assertion;
pub mod config;
pub mod matrix;
pub mod num;
pub mod quaternion;
pub mod transform;
pub mod vector;

pub use config::{AngleUnit, AssertionPolicy, MathConfig};
pub use num::{Float, Real};
