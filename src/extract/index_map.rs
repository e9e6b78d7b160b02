use crate::error::*;
use crate::util::*;

/// First half of an extraction pipeline: turn a logical index into the
/// derived index or region that `Access` reads from a collection.
pub trait IndexMap<const GRID_DIMENSION: usize> {
    type Derived;

    fn map(&self, index: &Coord<GRID_DIMENSION>) -> Self::Derived;

    /// Whether the derived index lies fully inside `aabb`.
    fn is_interior(
        &self,
        index: &Coord<GRID_DIMENSION>,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> bool;

    /// Sub-box of `aabb` holding every interior index, possibly empty.
    fn interior(&self, aabb: &AABB<GRID_DIMENSION>) -> AABB<GRID_DIMENSION>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityMap;

impl<const GRID_DIMENSION: usize> IndexMap<GRID_DIMENSION> for IdentityMap {
    type Derived = Coord<GRID_DIMENSION>;

    #[inline]
    fn map(&self, index: &Coord<GRID_DIMENSION>) -> Coord<GRID_DIMENSION> {
        *index
    }

    fn is_interior(
        &self,
        index: &Coord<GRID_DIMENSION>,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> bool {
        aabb.contains(index)
    }

    fn interior(&self, aabb: &AABB<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        *aabb
    }
}

/// Expand an index into the box of half-width `radius` around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchMap<const GRID_DIMENSION: usize> {
    radius: Coord<GRID_DIMENSION>,
}

impl<const GRID_DIMENSION: usize> PatchMap<GRID_DIMENSION> {
    pub fn new(radius: [i32; GRID_DIMENSION]) -> Result<Self> {
        if radius.iter().any(|r| *r < 0) {
            return Err(PairwiseError::configuration(format!(
                "patch radius must be non-negative, got {:?}",
                radius
            )));
        }
        Ok(PatchMap {
            radius: Coord::from(radius),
        })
    }

    pub fn radius(&self) -> &Coord<GRID_DIMENSION> {
        &self.radius
    }
}

impl<const GRID_DIMENSION: usize> IndexMap<GRID_DIMENSION>
    for PatchMap<GRID_DIMENSION>
{
    type Derived = AABB<GRID_DIMENSION>;

    #[inline]
    fn map(&self, index: &Coord<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        AABB::from_mm(index - self.radius, index + self.radius)
    }

    fn is_interior(
        &self,
        index: &Coord<GRID_DIMENSION>,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> bool {
        aabb.contains_aabb(&self.map(index))
    }

    fn interior(&self, aabb: &AABB<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        aabb.shrink_by(&self.radius)
    }
}

/// Expand an index into the full line through it along `axis`,
/// e.g. a column of a matrix. The index component along `axis` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap<const GRID_DIMENSION: usize> {
    axis: usize,
    extent: (i32, i32),
}

impl<const GRID_DIMENSION: usize> AxisMap<GRID_DIMENSION> {
    /// Lines span `aabb` along `axis`.
    pub fn new(axis: usize, aabb: &AABB<GRID_DIMENSION>) -> Result<Self> {
        if axis >= GRID_DIMENSION {
            return Err(PairwiseError::configuration(format!(
                "axis {} does not exist in {} dimensions",
                axis, GRID_DIMENSION
            )));
        }
        Ok(AxisMap {
            axis,
            extent: (aabb.bounds[(axis, 0)], aabb.bounds[(axis, 1)]),
        })
    }

    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<const GRID_DIMENSION: usize> IndexMap<GRID_DIMENSION>
    for AxisMap<GRID_DIMENSION>
{
    type Derived = AABB<GRID_DIMENSION>;

    fn map(&self, index: &Coord<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        let mut region = AABB::from_mm(*index, *index);
        region.bounds[(self.axis, 0)] = self.extent.0;
        region.bounds[(self.axis, 1)] = self.extent.1;
        region
    }

    fn is_interior(
        &self,
        index: &Coord<GRID_DIMENSION>,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> bool {
        aabb.contains_aabb(&self.map(index))
    }

    fn interior(&self, aabb: &AABB<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        let mut result = *aabb;
        if aabb.bounds[(self.axis, 0)] > self.extent.0
            || aabb.bounds[(self.axis, 1)] < self.extent.1
        {
            // Lines stick out of aabb everywhere.
            result.bounds[(self.axis, 1)] = result.bounds[(self.axis, 0)] - 1;
        }
        result
    }
}

/// Arbitrary index map. The closure is trusted to stay inside the
/// collection, so every index counts as interior.
#[derive(Debug, Clone, Copy)]
pub struct FnMap<F> {
    f: F,
}

impl<F> FnMap<F> {
    pub fn new(f: F) -> Self {
        FnMap { f }
    }
}

impl<F, X, const GRID_DIMENSION: usize> IndexMap<GRID_DIMENSION> for FnMap<F>
where
    F: Fn(&Coord<GRID_DIMENSION>) -> X,
{
    type Derived = X;

    fn map(&self, index: &Coord<GRID_DIMENSION>) -> X {
        (self.f)(index)
    }

    fn is_interior(
        &self,
        _index: &Coord<GRID_DIMENSION>,
        _aabb: &AABB<GRID_DIMENSION>,
    ) -> bool {
        true
    }

    fn interior(&self, aabb: &AABB<GRID_DIMENSION>) -> AABB<GRID_DIMENSION> {
        *aabb
    }
}
