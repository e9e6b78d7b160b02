use crate::collection::*;
use crate::error::*;
use crate::util::*;

/// Second half of an extraction pipeline: read the operand for a derived
/// index out of a collection borrowed for `'c`.
pub trait Access<'c, C, I> {
    type Operand;

    fn access(&self, collection: &'c C, derived: &I) -> Result<Self::Operand>;
}

/// Single element by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementAccess;

impl<'c, C, const GRID_DIMENSION: usize> Access<'c, C, Coord<GRID_DIMENSION>>
    for ElementAccess
where
    C: Collection<GRID_DIMENSION>,
{
    type Operand = C::Elem;

    #[inline]
    fn access(
        &self,
        collection: &'c C,
        derived: &Coord<GRID_DIMENSION>,
    ) -> Result<C::Elem> {
        collection.get(derived)
    }
}

/// Zero-copy view of a derived region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewAccess;

impl<'c, C, const GRID_DIMENSION: usize> Access<'c, C, AABB<GRID_DIMENSION>>
    for ViewAccess
where
    C: DenseCollection<GRID_DIMENSION> + 'c,
{
    type Operand = PatchView<'c, GRID_DIMENSION, C::Elem>;

    #[inline]
    fn access(
        &self,
        collection: &'c C,
        derived: &AABB<GRID_DIMENSION>,
    ) -> Result<Self::Operand> {
        collection.patch(derived)
    }
}

/// Owned copy of a derived region, for collections without a dense buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyAccess;

impl<'c, C, const GRID_DIMENSION: usize> Access<'c, C, AABB<GRID_DIMENSION>>
    for CopyAccess
where
    C: Collection<GRID_DIMENSION>,
{
    type Operand = Vec<C::Elem>;

    fn access(
        &self,
        collection: &'c C,
        derived: &AABB<GRID_DIMENSION>,
    ) -> Result<Vec<C::Elem>> {
        if !collection.aabb().contains_aabb(derived) {
            return Err(PairwiseError::out_of_bounds(
                derived.min().as_slice(),
                collection.aabb(),
            ));
        }
        Ok(derived.coord_iter().map(|c| collection.view(&c)).collect())
    }
}

/// Arbitrary access. Errors the closure returns reach the reader unchanged.
#[derive(Debug, Clone, Copy)]
pub struct FnAccess<F> {
    f: F,
}

impl<F> FnAccess<F> {
    pub fn new(f: F) -> Self {
        FnAccess { f }
    }
}

impl<'c, C: 'c, I, O, F> Access<'c, C, I> for FnAccess<F>
where
    F: Fn(&'c C, &I) -> Result<O>,
{
    type Operand = O;

    fn access(&self, collection: &'c C, derived: &I) -> Result<O> {
        (self.f)(collection, derived)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn grid() -> OwnedCollection<2, f64> {
        OwnedCollection::from_fn(AABB::new(matrix![0, 4; 0, 4]), |c| {
            (c[0] * 5 + c[1]) as f64
        })
    }

    #[test]
    fn element_access_test() {
        let g = grid();
        assert_eq!(ElementAccess.access(&g, &vector![1, 2]).unwrap(), 7.0);
        assert!(ElementAccess.access(&g, &vector![5, 2]).is_err());
    }

    #[test]
    fn view_and_copy_agree_test() {
        let g = grid();
        let region = AABB::new(matrix![1, 3; 2, 4]);
        let view = ViewAccess.access(&g, &region).unwrap();
        let copy = CopyAccess.access(&g, &region).unwrap();
        assert_eq!(view.to_vec(), copy);

        let outside = AABB::new(matrix![3, 5; 2, 4]);
        assert!(ViewAccess.access(&g, &outside).unwrap_err().is_out_of_bounds());
        assert!(CopyAccess.access(&g, &outside).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn fn_access_passes_errors_through_test() {
        let g = grid();
        let a = FnAccess::new(|c: &OwnedCollection<2, f64>, i: &Coord<2>| {
            if i[0] == 0 {
                Err(PairwiseError::Operand("row zero is reserved".to_string()))
            } else {
                c.get(i).map(|v| v * 2.0)
            }
        });
        assert_eq!(a.access(&g, &vector![1, 1]).unwrap(), 12.0);
        assert_eq!(
            a.access(&g, &vector![0, 1]).unwrap_err(),
            PairwiseError::Operand("row zero is reserved".to_string())
        );
    }
}
