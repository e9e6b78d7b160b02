//! Eager fill of a local window ahead of reads.
//!
//! Precomputing costs `O(|interior A| * |window|)` distance evaluations
//! up front, whether or not the pairs are ever read, and buys reads that
//! skip the cache's computed-or-not check. Sparse read patterns can come
//! out slower than the plain lazy cache, so this is opt-in: measure with
//! the `pairwise_bench` binary before turning it on.

use crate::cache::*;
use crate::distances::*;
use crate::error::*;
use crate::extract::*;
use crate::pairwise::*;
use crate::util::indexing::*;
use crate::util::*;

/// A pairwise array cached by a `LocalWindow`.
pub type WindowedArray<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize> =
    PairwiseArray<'a, CA, CB, SA, SB, F, LocalWindowStore<RANK_A, RANK_B, T>, RANK_A, RANK_B>;

/// A local window cached array plus a dense buffer covering the interior
/// pairs inside the window. Slots whose extraction failed stay empty and
/// are read through the lazy path.
pub struct PrecomputedArray<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize> {
    array: WindowedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B>,
    interior_a: AABB<RANK_A>,
    interior_b: AABB<RANK_B>,
    window: AABB<RANK_A>,
    window_len: usize,
    dense: Vec<Option<T>>,
    precomputed: usize,
}

impl<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize>
    WindowedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B>
where
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    T: Copy,
{
    /// Fill every interior, in-window pair now. Pairs touching the
    /// boundary, or whose operands fail to extract, are left to the
    /// regular read path, which reports the failure when they are read.
    pub fn precompute(self) -> PrecomputedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B> {
        profiling::scope!("PairwiseArray::precompute");
        debug_assert_eq!(RANK_A, RANK_B);

        let collections = self.collections();
        let mut interior_a = self.pipeline().a.interior(collections.a);
        interior_a.trim_to_aabb(self.domain_a());
        let mut interior_b = self.pipeline().b.interior(collections.b);
        interior_b.trim_to_aabb(self.domain_b());

        let window = *self.store().window();
        let radius = self.store().radius();
        let window_len = window.buffer_size();
        let mut dense = vec![None; interior_a.buffer_size() * window_len];
        let mut precomputed = 0;
        let mut failed = 0;

        if !interior_a.is_empty() {
            for q in interior_b.coord_iter() {
                // One B operand serves every A position in its window.
                let Ok(operand_b) = self.pipeline().b.extract(collections.b, &q) else {
                    failed += 1;
                    continue;
                };
                let q_in_a: Coord<RANK_A> = Coord::from_fn(|d, _| q[d]);
                let mut candidates = AABB::from_mm(
                    Coord::from_fn(|d, _| q_in_a[d].saturating_sub(radius[d])),
                    Coord::from_fn(|d, _| q_in_a[d].saturating_add(radius[d])),
                );
                candidates.trim_to_aabb(&interior_a);
                if !candidates.check_validity() {
                    continue;
                }
                for p in candidates.coord_iter() {
                    let Ok(operand_a) = self.pipeline().a.extract(collections.a, &p) else {
                        failed += 1;
                        continue;
                    };
                    let offset = q_in_a - p;
                    let slot = interior_a.coord_to_linear(&p) * window_len
                        + window.coord_to_linear(&offset);
                    dense[slot] = Some(self.distance_fn().distance(&operand_a, &operand_b));
                    precomputed += 1;
                }
            }
        }

        log::info!(
            "precomputed {} pairs over interior {} x {} with window {}, {} failed extractions",
            precomputed,
            interior_a,
            interior_b,
            window,
            failed
        );

        PrecomputedArray {
            array: self,
            interior_a,
            interior_b,
            window,
            window_len,
            dense,
            precomputed,
        }
    }
}

impl<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize>
    PrecomputedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B>
where
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    T: Copy,
{
    #[inline]
    fn dense_slot(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Option<usize> {
        if !self.interior_a.contains(p) || !self.interior_b.contains(q) {
            return None;
        }
        let offset = checked_offset(p, q).filter(|offset| self.window.contains(offset))?;
        Some(
            self.interior_a.coord_to_linear(p) * self.window_len
                + self.window.coord_to_linear(&offset),
        )
    }

    /// Filled dense slot without any cache check, otherwise the wrapped
    /// array's regular read path.
    #[inline]
    pub fn read(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Result<T> {
        if let Some(value) = self.dense_slot(p, q).and_then(|slot| self.dense[slot]) {
            return Ok(value);
        }
        self.array.read(p, q)
    }

    pub fn read_flat(&self, flat_index: &[i32]) -> Result<T> {
        let (p, q) = split_index::<RANK_A, RANK_B>(flat_index)?;
        self.read(&p, &q)
    }

    pub fn interior_a(&self) -> &AABB<RANK_A> {
        &self.interior_a
    }

    pub fn interior_b(&self) -> &AABB<RANK_B> {
        &self.interior_b
    }

    /// Number of pairs filled ahead of time.
    pub fn precomputed(&self) -> usize {
        self.precomputed
    }

    pub fn inner(&self) -> &WindowedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B> {
        &self.array
    }

    pub fn into_inner(self) -> WindowedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B> {
        self.array
    }

    pub fn print_report(&self) {
        self.array.print_report();
        println!("  - interior a: {}", self.interior_a);
        println!("  - interior b: {}", self.interior_b);
        println!("  - precomputed pairs: {}", self.precomputed);
        println!("  - lazily cached cells: {}", self.array.store().populated());
    }
}

impl<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize> LazyArray
    for PrecomputedArray<'a, CA, CB, SA, SB, F, T, RANK_A, RANK_B>
where
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    T: Copy,
{
    type Elem = T;

    fn shape(&self) -> Vec<usize> {
        self.array.shape()
    }

    fn ranges(&self) -> Vec<(i32, i32)> {
        self.array.ranges()
    }

    fn get(&self, flat_index: &[i32]) -> Result<T> {
        self.read_flat(flat_index)
    }
}
