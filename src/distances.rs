//! The distance callable contract, plus a few reference distances.
//!
//! Any `Fn(&OA, &OB) -> T` is a distance. Closures need their argument
//! types written out, e.g. `|a: &f64, b: &f64| (a - b).abs()`, so the
//! compiler sees them as taking references of any lifetime.

use crate::collection::*;
use std::cell::Cell;

pub trait Distance<OA, OB> {
    type Output;

    fn distance(&self, a: &OA, b: &OB) -> Self::Output;
}

impl<OA, OB, T, F> Distance<OA, OB> for F
where
    F: Fn(&OA, &OB) -> T,
{
    type Output = T;

    #[inline]
    fn distance(&self, a: &OA, b: &OB) -> T {
        self(a, b)
    }
}

/// Wraps a distance and counts how often it runs.
pub struct Counted<F> {
    inner: F,
    calls: Cell<usize>,
}

impl<F> Counted<F> {
    pub fn new(inner: F) -> Self {
        Counted {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl<OA, OB, F: Distance<OA, OB>> Distance<OA, OB> for Counted<F> {
    type Output = F::Output;

    fn distance(&self, a: &OA, b: &OB) -> F::Output {
        self.calls.set(self.calls.get() + 1);
        self.inner.distance(a, b)
    }
}

/// Lets a counter be lent to an array and inspected afterwards.
impl<OA, OB, F: Distance<OA, OB>> Distance<OA, OB> for &Counted<F> {
    type Output = F::Output;

    fn distance(&self, a: &OA, b: &OB) -> F::Output {
        (**self).distance(a, b)
    }
}

pub fn abs_diff(a: &f64, b: &f64) -> f64 {
    (a - b).abs()
}

/// Sum of squared differences between two equally shaped patches.
/// Patches are compared in their own linear order.
pub fn patch_sq_euclidean<const GRID_DIMENSION: usize>(
    a: &PatchView<'_, GRID_DIMENSION, f64>,
    b: &PatchView<'_, GRID_DIMENSION, f64>,
) -> f64 {
    debug_assert_eq!(a.aabb().shape(), b.aabb().shape());
    a.values()
        .zip(b.values())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

pub fn sq_euclidean(a: &Vec<f64>, b: &Vec<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
