//! Cache strategies for pairwise arrays.
//! A strategy is a small description (`NullCache`, `LocalWindow`) that
//! builds the store a pairwise array owns for its whole lifetime.
//! Stores are keyed by `(p, q - p)`.

mod local_window;
mod null;

pub use local_window::*;
pub use null::*;

use crate::error::*;
use crate::util::*;

/// Result of asking a store about the pair `(p, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The store never keeps this pair, evaluate and move on.
    Bypass,
    /// The pair belongs in `slot` but has not been computed yet.
    Miss(usize),
    Hit(T),
}

pub trait CacheStore<const RANK_A: usize, const RANK_B: usize> {
    type Value: Copy;

    /// `false` lets the read path skip the store entirely at compile time.
    const ENABLED: bool;

    /// `p` must lie in the A domain the store was built for.
    fn lookup(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Lookup<Self::Value>;

    /// Record the value for a slot handed out by `lookup`.
    fn fill(&self, slot: usize, value: Self::Value);
}

pub trait CacheStrategy<const RANK_A: usize, const RANK_B: usize> {
    type Store<T: Copy>: CacheStore<RANK_A, RANK_B, Value = T>;

    fn make_store<T: Copy>(
        &self,
        domain_a: &AABB<RANK_A>,
        domain_b: &AABB<RANK_B>,
    ) -> Result<Self::Store<T>>;
}
