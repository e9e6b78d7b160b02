use crate::util::indexing::*;
use crate::util::*;

/// Axis Aligned Bounding Box (AABB) for coordinate types.
/// Each instance is inclusive of both corners.
/// This is the index domain for one side of a pairwise array,
/// and it maps between dense linear buffers and coordinates.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AABB<const DIMENSION: usize> {
    pub bounds: Bounds<DIMENSION>,
}

impl<const GRID_DIMENSION: usize> std::fmt::Display for AABB<GRID_DIMENSION> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(f, "[")?;
        for d in 0..GRID_DIMENSION {
            if d > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}..={}", self.bounds[(d, 0)], self.bounds[(d, 1)])?;
        }
        write!(f, "]")
    }
}

impl<const DIMENSION: usize> AABB<DIMENSION> {
    /// Create AABB from raw bounds.
    #[inline]
    pub fn new(bounds: Bounds<DIMENSION>) -> Self {
        AABB { bounds }
    }

    /// Create AABB from corners.
    pub fn from_mm(min: Coord<DIMENSION>, max: Coord<DIMENSION>) -> Self {
        AABB {
            bounds: Bounds::from_columns(&[min, max]),
        }
    }

    /// Zero based box with the given number of entries per dimension,
    /// i.e. a shape of [10] becomes [0, 9].
    pub fn from_shape(shape: [usize; DIMENSION]) -> Self {
        let max = Coord::from_fn(|d, _| shape[d] as i32 - 1);
        AABB::from_mm(Coord::zeros(), max)
    }

    /// Box of all offsets within `radius` of the origin.
    pub fn centered(radius: &Coord<DIMENSION>) -> Self {
        AABB::from_mm(-radius, *radius)
    }

    /// Moving min to the origin, returns the exclusive size in each direction
    /// i.e. [0, 9]  would have exclusive size of 10.
    pub fn exclusive_bounds(&self) -> Coord<DIMENSION> {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    /// Number of entries per dimension, zero for inverted dimensions.
    pub fn shape(&self) -> [usize; DIMENSION] {
        let exclusive_bounds = self.exclusive_bounds();
        std::array::from_fn(|d| exclusive_bounds[d].max(0) as usize)
    }

    /// Return the number of coordinates contained in the instance.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_size() == 0
    }

    /// Return the linear index for a coord in the instance
    pub fn coord_to_linear(&self, coord: &Coord<DIMENSION>) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    /// Return the coordinate in the instance for a given linear index.
    pub fn linear_to_coord(&self, index: usize) -> Coord<DIMENSION> {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Check whether the instance contains a coordinate.
    #[inline]
    pub fn contains(&self, coord: &Coord<DIMENSION>) -> bool {
        for d in 0..DIMENSION {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Check whether another AABB is contained in the instance.
    pub fn contains_aabb(&self, other: &Self) -> bool {
        for d in 0..DIMENSION {
            if other.bounds[(d, 0)] < self.bounds[(d, 0)]
                || other.bounds[(d, 1)] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Intersect with `other`, may leave the instance empty.
    pub fn trim_to_aabb(&mut self, other: &Self) {
        for d in 0..DIMENSION {
            self.bounds[(d, 0)] = self.bounds[(d, 0)].max(other.bounds[(d, 0)]);
            self.bounds[(d, 1)] = self.bounds[(d, 1)].min(other.bounds[(d, 1)]);
        }
    }

    /// Element wise add the bounds diff.
    pub fn add_bounds_diff(&self, diff: Bounds<DIMENSION>) -> Self {
        Self::new(self.bounds + diff)
    }

    /// Expand each side by `radius`.
    pub fn grow(&self, radius: &Coord<DIMENSION>) -> Self {
        self.add_bounds_diff(Bounds::from_columns(&[-radius, *radius]))
    }

    /// Pull each side in by `radius`.
    /// The result is empty when the box is too small.
    pub fn shrink_by(&self, radius: &Coord<DIMENSION>) -> Self {
        self.add_bounds_diff(Bounds::from_columns(&[*radius, -radius]))
    }

    /// Return min corner.
    pub fn min(&self) -> Coord<DIMENSION> {
        self.bounds.column(0).into()
    }

    /// Return max corner
    pub fn max(&self) -> Coord<DIMENSION> {
        self.bounds.column(1).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        for d in 0..DIMENSION {
            if self.bounds[(d, 0)] > self.bounds[(d, 1)] {
                return false;
            }
        }
        true
    }

    /// Inclusive `(min, max)` per dimension.
    pub fn ranges(&self) -> [(i32, i32); DIMENSION] {
        std::array::from_fn(|d| (self.bounds[(d, 0)], self.bounds[(d, 1)]))
    }

    /// Return iterator over contained coords
    /// in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord<DIMENSION>> + '_ {
        (0..self.buffer_size()).map(|i| self.linear_to_coord(i))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        {
            let a = AABB::new(matrix![0, 5]);
            assert_eq!(a.buffer_size(), 6);
            assert_eq!(a.shape(), [6]);
        }

        {
            let dimensions = AABB::new(matrix![0, 5; 0, 7; 0, 9]);
            assert_eq!(dimensions.buffer_size(), 6 * 8 * 10);
            assert_eq!(dimensions.shape(), [6, 8, 10]);
        }

        {
            let dimensions = AABB::new(matrix![1, 6; 1, 8; 1, 10]);
            assert_eq!(dimensions.buffer_size(), 6 * 8 * 10);
        }

        {
            let inverted = AABB::new(matrix![4, 3; 0, 2]);
            assert!(inverted.is_empty());
            assert_eq!(inverted.shape(), [0, 3]);
        }
    }

    #[test]
    fn coord_to_linear_in_box_test() {
        let bb = AABB::new(matrix![0, 9; 0, 9; 0, 9]);
        let lin_1 = bb.coord_to_linear(&vector![5, 5, 5]);
        let lin_2 = coord_to_linear(&vector![5, 5, 5], &vector![10, 10, 10]);
        assert_eq!(lin_1, lin_2);
    }

    #[test]
    fn linear_to_coord_test() {
        {
            let bb = AABB::new(matrix![2, 8]);
            assert_eq!(bb.linear_to_coord(5), vector![7]);
        }

        {
            let a = AABB::new(matrix![1, 9]);
            assert_eq!(a.linear_to_coord(0), vector![1]);
        }

        {
            let window = AABB::centered(&vector![1, 2]);
            assert_eq!(window.linear_to_coord(0), vector![-1, -2]);
            assert_eq!(window.coord_to_linear(&vector![0, 0]), 7);
        }
    }

    #[test]
    fn in_box_comp_test() {
        {
            let bound = AABB::new(matrix![0, 9]);
            let c = vector![8];
            let li = bound.coord_to_linear(&c);
            assert_eq!(c, bound.linear_to_coord(li));
        }

        {
            let bound = AABB::new(matrix![-3, 9; 4, 9]);
            let c = vector![-2, 8];
            let li = bound.coord_to_linear(&c);
            assert_eq!(c, bound.linear_to_coord(li));
        }
    }

    #[test]
    fn contains_test() {
        let bound = AABB::new(matrix![1, 10; 1, 10]);
        assert!(bound.contains(&vector![1, 1]));
        assert!(bound.contains(&vector![10, 10]));
        assert!(!bound.contains(&vector![0, 5]));
        assert!(!bound.contains(&vector![5, 11]));
        assert!(!bound.contains(&vector![11, 0]));
    }

    #[test]
    fn contains_aabb_test() {
        {
            let a = AABB::new(matrix![0, 9]);
            let b = AABB::new(matrix![0, 9]);
            assert!(a.contains_aabb(&b));
        }

        {
            let a = AABB::new(matrix![0, 9; 0, 9]);
            let b = AABB::new(matrix![2, 4; -1, 3]);
            assert!(!a.contains_aabb(&b));
        }
    }

    #[test]
    fn check_validity_test() {
        assert!(AABB::new(matrix![0, 9]).check_validity());
        assert!(!AABB::new(matrix![9, 0]).check_validity());
        assert!(AABB::new(matrix![0, 0]).check_validity());
    }

    #[test]
    fn grow_shrink_test() {
        let grid = AABB::new(matrix![1, 10; 1, 10]);
        let radius = vector![2, 2];
        assert_eq!(grid.shrink_by(&radius), AABB::new(matrix![3, 8; 3, 8]));
        assert_eq!(grid.shrink_by(&radius).grow(&radius), grid);
        assert!(grid.shrink_by(&vector![5, 0]).is_empty());
    }

    #[test]
    fn from_shape_test() {
        assert_eq!(
            AABB::from_shape([4, 6]),
            AABB::new(matrix![0, 3; 0, 5])
        );
        assert_eq!(AABB::from_shape([3]).ranges(), [(0, 2)]);
    }

    #[test]
    fn coord_iter_test() {
        let bound = AABB::new(matrix![0, 1; 5, 6]);
        let coords: Vec<_> = bound.coord_iter().collect();
        assert_eq!(
            coords,
            vec![vector![0, 5], vector![0, 6], vector![1, 5], vector![1, 6]]
        );
        assert_eq!(AABB::new(matrix![3, 2]).coord_iter().count(), 0);
    }

    #[test]
    fn display_test() {
        let bound = AABB::new(matrix![1, 6; -2, 2]);
        assert_eq!(format!("{}", bound), "[1..=6, -2..=2]");
    }
}
