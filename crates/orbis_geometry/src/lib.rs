//! Geometrical objects.

mod plane;
mod sphere;

pub use plane::Plane;
pub use sphere::{SpaceRelation, Sphere, SpherePoint};
