mod aabb;
mod ray;
mod sampling;

pub use aabb::AABB;
pub use ray::{intersect_aabb, Ray};
pub use sampling::Pcg32;
