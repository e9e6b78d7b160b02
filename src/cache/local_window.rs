use super::*;
use crate::util::indexing::checked_offset;
use std::cell::Cell;

/// Cache every pair whose offset `q - p` lies within a symmetric window
/// around zero. A window size of `w` keeps offsets in
/// `[-floor(w/2), floor(w/2)]`, so even sizes round up to the next odd shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalWindow<const GRID_DIMENSION: usize> {
    radius: Coord<GRID_DIMENSION>,
}

impl<const GRID_DIMENSION: usize> LocalWindow<GRID_DIMENSION> {
    pub fn new(window_size: [i32; GRID_DIMENSION]) -> Result<Self> {
        if window_size.iter().any(|w| *w < 0) {
            return Err(PairwiseError::configuration(format!(
                "window size must be non-negative, got {:?}",
                window_size
            )));
        }
        Ok(LocalWindow {
            radius: Coord::from(window_size.map(|w| w / 2)),
        })
    }

    pub fn radius(&self) -> &Coord<GRID_DIMENSION> {
        &self.radius
    }

    /// `2 * floor(w / 2) + 1` per dimension.
    pub fn window_shape(&self) -> [usize; GRID_DIMENSION] {
        AABB::centered(&self.radius).shape()
    }
}

impl<const RANK_A: usize, const RANK_B: usize> CacheStrategy<RANK_A, RANK_B>
    for LocalWindow<RANK_A>
{
    type Store<T: Copy> = LocalWindowStore<RANK_A, RANK_B, T>;

    fn make_store<T: Copy>(
        &self,
        domain_a: &AABB<RANK_A>,
        domain_b: &AABB<RANK_B>,
    ) -> Result<LocalWindowStore<RANK_A, RANK_B, T>> {
        profiling::scope!("LocalWindow::make_store");
        if RANK_A != RANK_B {
            return Err(PairwiseError::configuration(format!(
                "local window caching needs domains of equal rank, got {} ({}) and {} ({})",
                domain_a, RANK_A, domain_b, RANK_B
            )));
        }
        let window = AABB::centered(&self.radius);
        let window_len = window.buffer_size();
        let n_cells = domain_a.buffer_size() * window_len;
        log::debug!(
            "local window store: domain {} x window {} = {} cells",
            domain_a,
            window,
            n_cells
        );
        Ok(LocalWindowStore {
            domain_a: *domain_a,
            window,
            window_len,
            cells: vec![Cell::new(None); n_cells],
            _rank_b: std::marker::PhantomData,
        })
    }
}

/// Dense `domain_a ++ window` buffer of tri-state cells.
/// `None` means not computed yet, a real zero is `Some(0)`.
///
/// Cells live in `Cell`s so reads through `&self` can populate them,
/// which also makes the store `!Sync`.
pub struct LocalWindowStore<const RANK_A: usize, const RANK_B: usize, T> {
    domain_a: AABB<RANK_A>,
    window: AABB<RANK_A>,
    window_len: usize,
    cells: Vec<Cell<Option<T>>>,
    _rank_b: std::marker::PhantomData<Coord<RANK_B>>,
}

impl<const RANK_A: usize, const RANK_B: usize, T: Copy>
    LocalWindowStore<RANK_A, RANK_B, T>
{
    /// Offsets are stored in the A coordinate space. Construction
    /// guarantees both ranks agree. `None` when `q - p` overflows, such
    /// a pair can never be in the window.
    #[inline]
    pub fn offset(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Option<Coord<RANK_A>> {
        checked_offset(p, q)
    }

    /// Box of offsets that are cached.
    pub fn window(&self) -> &AABB<RANK_A> {
        &self.window
    }

    pub fn radius(&self) -> Coord<RANK_A> {
        self.window.max()
    }

    pub fn domain_a(&self) -> &AABB<RANK_A> {
        &self.domain_a
    }

    pub fn in_window(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> bool {
        self.offset(p, q)
            .is_some_and(|offset| self.window.contains(&offset))
    }

    #[inline]
    fn slot(&self, p: &Coord<RANK_A>, offset: &Coord<RANK_A>) -> usize {
        debug_assert!(self.domain_a.contains(p));
        debug_assert!(self.window.contains(offset));
        self.domain_a.coord_to_linear(p) * self.window_len
            + self.window.coord_to_linear(offset)
    }

    /// Cached value for `(p, offset)`: `None` when outside the store,
    /// `Some(None)` when not computed yet.
    pub fn peek(&self, p: &Coord<RANK_A>, offset: &Coord<RANK_A>) -> Option<Option<T>> {
        if !self.domain_a.contains(p) || !self.window.contains(offset) {
            return None;
        }
        Some(self.cells[self.slot(p, offset)].get())
    }

    /// Total number of cells, computed or not.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of computed cells.
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|c| c.get().is_some()).count()
    }
}

impl<const RANK_A: usize, const RANK_B: usize, T: Copy> CacheStore<RANK_A, RANK_B>
    for LocalWindowStore<RANK_A, RANK_B, T>
{
    type Value = T;

    const ENABLED: bool = true;

    #[inline]
    fn lookup(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Lookup<T> {
        let offset = match self.offset(p, q) {
            Some(offset) if self.window.contains(&offset) => offset,
            _ => return Lookup::Bypass,
        };
        let slot = self.slot(p, &offset);
        match self.cells[slot].get() {
            Some(value) => Lookup::Hit(value),
            None => Lookup::Miss(slot),
        }
    }

    #[inline]
    fn fill(&self, slot: usize, value: T) {
        self.cells[slot].set(Some(value));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn window_shape_test() {
        assert_eq!(LocalWindow::new([3]).unwrap().window_shape(), [3]);
        assert_eq!(LocalWindow::new([4]).unwrap().window_shape(), [5]);
        assert_eq!(LocalWindow::new([0, 1]).unwrap().window_shape(), [1, 1]);
        assert_eq!(LocalWindow::new([5, 2]).unwrap().window_shape(), [5, 3]);
        assert!(LocalWindow::new([3, -1]).is_err());
    }

    #[test]
    fn store_size_test() {
        let a = AABB::new(matrix![1, 6]);
        let b = AABB::new(matrix![1, 4]);
        let store = LocalWindow::new([3]).unwrap().make_store::<f64>(&a, &b).unwrap();
        assert_eq!(store.capacity(), 6 * 3);
        assert_eq!(store.populated(), 0);
        assert_eq!(store.radius(), vector![1]);
    }

    #[test]
    fn rank_mismatch_test() {
        let a = AABB::new(matrix![1, 6]);
        let b = AABB::new(matrix![1, 4; 1, 4]);
        let e = LocalWindow::new([3]).unwrap().make_store::<f64>(&a, &b);
        assert!(matches!(e, Err(PairwiseError::Configuration(_))));
    }

    #[test]
    fn lookup_fill_test() {
        let a = AABB::new(matrix![1, 6]);
        let b = AABB::new(matrix![1, 4]);
        let store = LocalWindow::new([3]).unwrap().make_store::<f64>(&a, &b).unwrap();

        // offset -1, inside the radius 1 window
        let slot = match store.lookup(&vector![3], &vector![2]) {
            Lookup::Miss(slot) => slot,
            other => panic!("expected miss, got {:?}", other),
        };
        store.fill(slot, 0.0);
        assert_eq!(store.lookup(&vector![3], &vector![2]), Lookup::Hit(0.0));
        assert_eq!(store.peek(&vector![3], &vector![-1]), Some(Some(0.0)));
        assert_eq!(store.peek(&vector![3], &vector![1]), Some(None));
        assert_eq!(store.populated(), 1);

        // offset -2 is outside
        assert_eq!(store.lookup(&vector![3], &vector![1]), Lookup::Bypass);
        assert!(!store.in_window(&vector![3], &vector![1]));
        assert_eq!(store.peek(&vector![3], &vector![-2]), None);
        assert_eq!(store.peek(&vector![7], &vector![0]), None);
    }

    #[test]
    fn extreme_coordinates_test() {
        let a = AABB::new(matrix![i32::MAX - 1, i32::MAX]);
        let b = AABB::new(matrix![i32::MIN, i32::MIN + 1]);
        let store = LocalWindow::new([3]).unwrap().make_store::<f64>(&a, &b).unwrap();
        assert_eq!(store.offset(&vector![i32::MAX], &vector![i32::MIN]), None);
        assert!(!store.in_window(&vector![i32::MAX], &vector![i32::MIN]));
        assert_eq!(
            store.lookup(&vector![i32::MAX], &vector![i32::MIN]),
            Lookup::Bypass
        );

        // near the top of the range, but still a small offset
        let store = LocalWindow::new([3]).unwrap().make_store::<f64>(&a, &a).unwrap();
        assert!(matches!(
            store.lookup(&vector![i32::MAX], &vector![i32::MAX - 1]),
            Lookup::Miss(_)
        ));
    }

    #[test]
    fn distinct_slots_test() {
        let a = AABB::new(matrix![0, 3; 0, 2]);
        let store =
            LocalWindow::new([3, 3]).unwrap().make_store::<i32>(&a, &a).unwrap();
        let mut seen = std::collections::HashSet::new();
        for p in a.coord_iter() {
            for offset in store.window().coord_iter() {
                let q = p + offset;
                match store.lookup(&p, &q) {
                    Lookup::Miss(slot) => assert!(seen.insert(slot)),
                    other => panic!("expected miss, got {:?}", other),
                }
            }
        }
        assert_eq!(seen.len(), store.capacity());
    }
}
