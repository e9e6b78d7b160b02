use super::*;
use std::marker::PhantomData;

/// No caching at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCache;

#[derive(Debug)]
pub struct NullStore<T> {
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for NullStore<T> {
    fn default() -> Self {
        NullStore {
            _value: PhantomData,
        }
    }
}

impl<T: Copy, const RANK_A: usize, const RANK_B: usize> CacheStore<RANK_A, RANK_B>
    for NullStore<T>
{
    type Value = T;

    const ENABLED: bool = false;

    #[inline]
    fn lookup(&self, _p: &Coord<RANK_A>, _q: &Coord<RANK_B>) -> Lookup<T> {
        Lookup::Bypass
    }

    #[inline]
    fn fill(&self, _slot: usize, _value: T) {
        debug_assert!(false, "NullStore never hands out slots");
    }
}

impl<const RANK_A: usize, const RANK_B: usize> CacheStrategy<RANK_A, RANK_B>
    for NullCache
{
    type Store<T: Copy> = NullStore<T>;

    fn make_store<T: Copy>(
        &self,
        _domain_a: &AABB<RANK_A>,
        _domain_b: &AABB<RANK_B>,
    ) -> Result<NullStore<T>> {
        Ok(NullStore::default())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn null_store_test() {
        let a = AABB::new(matrix![1, 6]);
        let b = AABB::new(matrix![1, 4; 1, 4]);
        let store = NullCache.make_store::<f64>(&a, &b).unwrap();
        assert_eq!(store.lookup(&vector![3], &vector![2, 2]), Lookup::Bypass);
        assert!(!<NullStore<f64> as CacheStore<1, 2>>::ENABLED);
        assert_eq!(std::mem::size_of::<NullStore<f64>>(), 0);
    }
}
