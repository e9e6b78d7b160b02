mod aabb;
pub mod indexing;
pub use aabb::*;

pub use nalgebra::{matrix, vector};
pub use num_traits::{Num, One, Zero};

/// Values the crate can sum and zero-fill.
pub trait NumTrait: Num + Copy {}
impl<T: Num + Copy> NumTrait for T {}

/// A point in a `GRID_DIMENSION` dimensional index space.
pub type Coord<const GRID_DIMENSION: usize> =
    nalgebra::SVector<i32, { GRID_DIMENSION }>;

/// Inclusive min (column 0) and max (column 1) per dimension.
pub type Bounds<const GRID_DIMENSION: usize> =
    nalgebra::SMatrix<i32, { GRID_DIMENSION }, 2>;
