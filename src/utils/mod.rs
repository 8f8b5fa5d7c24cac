pub mod indices;
/// Sorting algorithms
pub mod sort;
/// Vector and small-matrix arithmetic
pub mod vector;

pub use indices::Index;
pub use sort::*;
pub use vector::{Matrix, Vec2, Vec3, Vector};
