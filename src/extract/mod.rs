//! The value extraction pipeline: per side, an `IndexMap` followed by an
//! `Access`, turning a logical index into the operand handed to the
//! distance function. Both stages must be pure so that reads stay
//! reproducible and cached values stay valid.

mod access;
mod index_map;

pub use access::*;
pub use index_map::*;

use crate::collection::*;
use crate::error::*;
use crate::util::*;

/// One side of a pipeline, as seen by the pairwise array.
pub trait Extract<'c, C, const GRID_DIMENSION: usize> {
    type Operand;

    fn extract(
        &self,
        collection: &'c C,
        index: &Coord<GRID_DIMENSION>,
    ) -> Result<Self::Operand>;

    /// Whether extracting `index` stays inside `collection`.
    fn is_interior(&self, collection: &C, index: &Coord<GRID_DIMENSION>) -> bool;

    /// Every interior index of `collection`.
    fn interior(&self, collection: &C) -> AABB<GRID_DIMENSION>;
}

/// An `(index_map, access)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Side<M, A> {
    pub map: M,
    pub access: A,
}

impl<M, A> Side<M, A> {
    pub fn new(map: M, access: A) -> Self {
        Side { map, access }
    }
}

/// Element at the index itself.
pub type IdentitySide = Side<IdentityMap, ElementAccess>;

/// Zero-copy patch around the index.
pub type PatchSide<const GRID_DIMENSION: usize> =
    Side<PatchMap<GRID_DIMENSION>, ViewAccess>;

impl IdentitySide {
    pub fn identity() -> Self {
        Side::new(IdentityMap, ElementAccess)
    }
}

impl<const GRID_DIMENSION: usize> PatchSide<GRID_DIMENSION> {
    pub fn patch(radius: [i32; GRID_DIMENSION]) -> Result<Self> {
        Ok(Side::new(PatchMap::new(radius)?, ViewAccess))
    }
}

impl<'c, C, M, A, const GRID_DIMENSION: usize> Extract<'c, C, GRID_DIMENSION>
    for Side<M, A>
where
    C: Collection<GRID_DIMENSION>,
    M: IndexMap<GRID_DIMENSION>,
    A: Access<'c, C, M::Derived>,
{
    type Operand = A::Operand;

    #[inline]
    fn extract(
        &self,
        collection: &'c C,
        index: &Coord<GRID_DIMENSION>,
    ) -> Result<A::Operand> {
        let derived = self.map.map(index);
        self.access.access(collection, &derived)
    }

    fn is_interior(&self, collection: &C, index: &Coord<GRID_DIMENSION>) -> bool {
        self.map.is_interior(index, collection.aabb())
    }

    fn interior(&self, collection: &C) -> AABB<GRID_DIMENSION> {
        let mut interior = self.map.interior(collection.aabb());
        interior.trim_to_aabb(collection.aabb());
        interior
    }
}

/// Fixed arity pair of sides, A then B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline<SA, SB> {
    pub a: SA,
    pub b: SB,
}

impl<SA, SB> Pipeline<SA, SB> {
    pub fn new(a: SA, b: SB) -> Self {
        Pipeline { a, b }
    }

    /// Operands for the index pair `(p, q)`.
    #[inline]
    pub fn evaluate<'c, CA, CB, const RANK_A: usize, const RANK_B: usize>(
        &self,
        collections: CollectionPair<'c, CA, CB>,
        p: &Coord<RANK_A>,
        q: &Coord<RANK_B>,
    ) -> Result<(SA::Operand, SB::Operand)>
    where
        SA: Extract<'c, CA, RANK_A>,
        SB: Extract<'c, CB, RANK_B>,
    {
        let operand_a = self.a.extract(collections.a, p)?;
        let operand_b = self.b.extract(collections.b, q)?;
        Ok((operand_a, operand_b))
    }
}

impl<S: Clone> Pipeline<S, S> {
    /// Same side description for A and B.
    pub fn symmetric(side: S) -> Self {
        Pipeline {
            a: side.clone(),
            b: side,
        }
    }
}

impl Default for Pipeline<IdentitySide, IdentitySide> {
    fn default() -> Self {
        Pipeline::symmetric(IdentitySide::identity())
    }
}

impl<SA, SB> From<(SA, SB)> for Pipeline<SA, SB> {
    fn from((a, b): (SA, SB)) -> Self {
        Pipeline { a, b }
    }
}

impl<S> From<[S; 2]> for Pipeline<S, S> {
    fn from([a, b]: [S; 2]) -> Self {
        Pipeline { a, b }
    }
}

/// A resizable list only works when it holds exactly one side per
/// collection.
impl<S> TryFrom<Vec<S>> for Pipeline<S, S> {
    type Error = PairwiseError;

    fn try_from(sides: Vec<S>) -> Result<Self> {
        let found = sides.len();
        let [a, b]: [S; 2] = sides.try_into().map_err(|_| {
            PairwiseError::configuration(format!(
                "expected exactly 2 pipeline sides, got {}",
                found
            ))
        })?;
        Ok(Pipeline { a, b })
    }
}
