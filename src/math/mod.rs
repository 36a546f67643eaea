mod color;
mod ray;

pub use color::{Color, Rgba};
pub use ray::{intersect_horizontal_plane, Ray, RAY_EPSILON};
