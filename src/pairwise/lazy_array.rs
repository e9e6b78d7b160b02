use crate::error::*;
use crate::util::*;

/// Read-only, shape-queryable, element-indexable container whose
/// elements may be computed on demand. Indices are flat coordinate
/// tuples with one component per dimension, inside `ranges()`.
pub trait LazyArray {
    type Elem: Copy;

    fn shape(&self) -> Vec<usize>;

    /// Inclusive `(min, max)` per dimension.
    fn ranges(&self) -> Vec<(i32, i32)>;

    fn get(&self, flat_index: &[i32]) -> Result<Self::Elem>;

    fn ndim(&self) -> usize {
        self.shape().len()
    }

    fn len(&self) -> usize {
        self.shape().iter().product()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every valid index in row-major order.
    fn index_iter(&self) -> IndexIter {
        IndexIter::new(self.ranges())
    }

    /// Stops at the first failing read.
    fn try_fold<Acc, G>(&self, init: Acc, mut g: G) -> Result<Acc>
    where
        G: FnMut(Acc, Self::Elem) -> Acc,
    {
        let mut acc = init;
        for index in self.index_iter() {
            acc = g(acc, self.get(&index)?);
        }
        Ok(acc)
    }

    fn sum(&self) -> Result<Self::Elem>
    where
        Self::Elem: NumTrait,
    {
        self.try_fold(Self::Elem::zero(), |acc, v| acc + v)
    }

    /// Materialize every element in row-major order.
    fn to_vec(&self) -> Result<Vec<Self::Elem>> {
        let mut result = Vec::with_capacity(self.len());
        for index in self.index_iter() {
            result.push(self.get(&index)?);
        }
        Ok(result)
    }
}

/// Row-major odometer over inclusive per-dimension ranges,
/// the last dimension goes the fastest.
#[derive(Debug, Clone)]
pub struct IndexIter {
    ranges: Vec<(i32, i32)>,
    next: Option<Vec<i32>>,
}

impl IndexIter {
    pub fn new(ranges: Vec<(i32, i32)>) -> Self {
        let empty = ranges.is_empty() || ranges.iter().any(|(lo, hi)| lo > hi);
        let next = if empty {
            None
        } else {
            Some(ranges.iter().map(|(lo, _)| *lo).collect())
        };
        IndexIter { ranges, next }
    }
}

impl Iterator for IndexIter {
    type Item = Vec<i32>;

    fn next(&mut self) -> Option<Vec<i32>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for d in (0..successor.len()).rev() {
            if successor[d] < self.ranges[d].1 {
                successor[d] += 1;
                self.next = Some(successor);
                break;
            }
            successor[d] = self.ranges[d].0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// `value = sum of components`, over a fixed box.
    struct SumArray {
        ranges: Vec<(i32, i32)>,
    }

    impl LazyArray for SumArray {
        type Elem = i64;

        fn shape(&self) -> Vec<usize> {
            self.ranges
                .iter()
                .map(|(lo, hi)| (hi - lo + 1).max(0) as usize)
                .collect()
        }

        fn ranges(&self) -> Vec<(i32, i32)> {
            self.ranges.clone()
        }

        fn get(&self, flat_index: &[i32]) -> Result<i64> {
            for (c, (lo, hi)) in flat_index.iter().zip(self.ranges.iter()) {
                if c < lo || c > hi {
                    return Err(PairwiseError::out_of_bounds(
                        flat_index,
                        &format!("{:?}", self.ranges),
                    ));
                }
            }
            Ok(flat_index.iter().map(|c| *c as i64).sum())
        }
    }

    #[test]
    fn index_iter_test() {
        let v: Vec<Vec<i32>> = IndexIter::new(vec![(1, 2), (-1, 0)]).collect();
        assert_eq!(v, vec![vec![1, -1], vec![1, 0], vec![2, -1], vec![2, 0]]);
        assert_eq!(IndexIter::new(vec![(1, 2), (3, 2)]).count(), 0);
        assert_eq!(IndexIter::new(vec![]).count(), 0);
    }

    #[test]
    fn reductions_test() {
        let a = SumArray {
            ranges: vec![(1, 3), (0, 1)],
        };
        assert_eq!(a.ndim(), 2);
        assert_eq!(a.len(), 6);
        assert_eq!(a.to_vec().unwrap(), vec![1, 2, 2, 3, 3, 4]);
        assert_eq!(a.sum().unwrap(), 15);
        assert_eq!(a.try_fold(i64::MIN, |m, v| m.max(v)).unwrap(), 4);
        assert!(a.get(&[4, 0]).unwrap_err().is_out_of_bounds());
    }
}
