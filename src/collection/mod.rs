//! Backing collections for the two sides of a pairwise array.
//! Collections are addressed by world coordinates inside their AABB.
//! A pairwise array only ever reads them, and borrows them for its
//! whole lifetime so the data cannot change underneath the cache.

mod owned;
mod pair;
mod patch;
mod slice;

pub use owned::*;
pub use pair::*;
pub use patch::*;
pub use slice::*;

use crate::error::*;
use crate::util::*;

pub trait Collection<const GRID_DIMENSION: usize> {
    type Elem: Copy;

    fn aabb(&self) -> &AABB<GRID_DIMENSION>;

    /// Unchecked in release builds, the caller must stay inside `aabb()`.
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> Self::Elem;

    fn get(&self, world_coord: &Coord<GRID_DIMENSION>) -> Result<Self::Elem> {
        if !self.aabb().contains(world_coord) {
            return Err(PairwiseError::out_of_bounds(
                world_coord.as_slice(),
                self.aabb(),
            ));
        }
        Ok(self.view(world_coord))
    }

    /// Values in linear order of `aabb()`.
    fn values(&self) -> impl Iterator<Item = Self::Elem> + '_ {
        self.aabb().coord_iter().map(|c| self.view(&c))
    }
}

/// Collections that store their values in one dense row-major buffer
/// covering their AABB. These can hand out zero-copy patch views.
pub trait DenseCollection<const GRID_DIMENSION: usize>:
    Collection<GRID_DIMENSION>
{
    fn buffer(&self) -> &[Self::Elem];

    /// Zero-copy view of `region`, which must lie inside `aabb()`.
    fn patch(
        &self,
        region: &AABB<GRID_DIMENSION>,
    ) -> Result<PatchView<'_, GRID_DIMENSION, Self::Elem>> {
        PatchView::new(*region, *self.aabb(), self.buffer())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn checked_get_test() {
        let bounds = AABB::new(matrix![1, 3; 1, 3]);
        let c = OwnedCollection::from_fn(bounds, |c| c[0] * 10 + c[1]);
        assert_eq!(c.get(&vector![2, 3]).unwrap(), 23);
        let e = c.get(&vector![0, 3]).unwrap_err();
        assert!(e.is_out_of_bounds());
    }

    #[test]
    fn values_order_test() {
        let bounds = AABB::new(matrix![0, 1; 0, 2]);
        let c = OwnedCollection::from_fn(bounds, |c| c[0] * 3 + c[1]);
        let v: Vec<i32> = c.values().collect();
        assert_eq!(v, vec![0, 1, 2, 3, 4, 5]);
    }
}
