use crate::error::*;
use crate::util::*;

/// Number of coordinates in a box with the given exclusive size.
/// Any non-positive side makes the box empty.
pub fn real_buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        if *d <= 0 {
            return 0;
        }
        accumulator *= *d as usize;
    }
    accumulator
}

/// Row-major linear index, the highest dimension goes the fastest.
/// `coord` is relative to the box origin.
pub fn coord_to_linear<const GRID_DIMENSION: usize>(
    coord: &Coord<GRID_DIMENSION>,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> usize {
    let mut accumulator = 0;
    for d in 0..GRID_DIMENSION {
        debug_assert!(coord[d] >= 0);
        debug_assert!(coord[d] < exclusive_bounds[d]);
        accumulator = accumulator * exclusive_bounds[d] as usize
            + coord[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const GRID_DIMENSION: usize>(
    linear_index: usize,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> Coord<GRID_DIMENSION> {
    let mut result = Coord::zeros();
    let mut index_accumulator = linear_index;
    for d in (0..GRID_DIMENSION).rev() {
        let side = exclusive_bounds[d] as usize;
        result[d] = (index_accumulator % side) as i32;
        index_accumulator /= side;
    }
    result
}

/// Split a flat coordinate tuple into its A side (first `RANK_A`
/// components) and B side (the remaining `RANK_B`).
/// No bounds checking happens here.
pub fn split_index<const RANK_A: usize, const RANK_B: usize>(
    flat_index: &[i32],
) -> Result<(Coord<RANK_A>, Coord<RANK_B>)> {
    if flat_index.len() != RANK_A + RANK_B {
        return Err(PairwiseError::RankMismatch {
            expected: RANK_A + RANK_B,
            found: flat_index.len(),
        });
    }
    let (a, b) = flat_index.split_at(RANK_A);
    Ok((Coord::from_column_slice(a), Coord::from_column_slice(b)))
}

/// Join an A side and a B side coordinate back into one flat tuple.
pub fn join_index<const RANK_A: usize, const RANK_B: usize>(
    index_a: &Coord<RANK_A>,
    index_b: &Coord<RANK_B>,
) -> Vec<i32> {
    index_a.iter().chain(index_b.iter()).copied().collect()
}

/// `q - p` in the A coordinate space, `None` when a component does not
/// fit in an `i32`. Only the first `RANK_A` components of `q` are used.
pub fn checked_offset<const RANK_A: usize, const RANK_B: usize>(
    p: &Coord<RANK_A>,
    q: &Coord<RANK_B>,
) -> Option<Coord<RANK_A>> {
    debug_assert!(RANK_A <= RANK_B);
    let mut offset = Coord::<RANK_A>::zeros();
    for d in 0..RANK_A {
        offset[d] = q[d].checked_sub(p[d])?;
    }
    Some(offset)
}

/// Shape of a pairwise array: `shape(a) ++ shape(b)`.
pub fn concat_shape<const RANK_A: usize, const RANK_B: usize>(
    domain_a: &AABB<RANK_A>,
    domain_b: &AABB<RANK_B>,
) -> Vec<usize> {
    domain_a
        .shape()
        .into_iter()
        .chain(domain_b.shape())
        .collect()
}
