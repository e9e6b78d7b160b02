use super::*;

/// Distance matrix between two indexed collections, computed on read.
///
/// Logically this is an array of shape `shape(domain_a) ++ shape(domain_b)`.
/// Reading `(p, q)` extracts one operand per side through the pipeline and
/// hands them to the distance. The store `S` decides whether the result is
/// remembered, see `crate::cache`.
pub struct PairwiseArray<'a, CA, CB, SA, SB, F, S, const RANK_A: usize, const RANK_B: usize> {
    domain_a: AABB<RANK_A>,
    domain_b: AABB<RANK_B>,
    collections: CollectionPair<'a, CA, CB>,
    pipeline: Pipeline<SA, SB>,
    distance: F,
    store: S,
}

impl<'a, CA, CB, SA, SB, F, S, T, const RANK_A: usize, const RANK_B: usize>
    PairwiseArray<'a, CA, CB, SA, SB, F, S, RANK_A, RANK_B>
where
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    S: CacheStore<RANK_A, RANK_B, Value = T>,
    T: Copy,
{
    /// Build over explicit index domains.
    pub fn new<CS>(
        domain_a: AABB<RANK_A>,
        domain_b: AABB<RANK_B>,
        collections: CollectionPair<'a, CA, CB>,
        pipeline: Pipeline<SA, SB>,
        distance: F,
        strategy: &CS,
    ) -> Result<Self>
    where
        CS: CacheStrategy<RANK_A, RANK_B, Store<T> = S>,
    {
        profiling::scope!("PairwiseArray::new");
        for (name, valid) in [
            ("A", domain_a.check_validity()),
            ("B", domain_b.check_validity()),
        ] {
            if !valid {
                return Err(PairwiseError::configuration(format!(
                    "domain {} is inverted: {} / {}",
                    name, domain_a, domain_b
                )));
            }
        }
        let store = strategy.make_store::<T>(&domain_a, &domain_b)?;
        Ok(PairwiseArray {
            domain_a,
            domain_b,
            collections,
            pipeline,
            distance,
            store,
        })
    }

    #[inline]
    pub fn domain_a(&self) -> &AABB<RANK_A> {
        &self.domain_a
    }

    #[inline]
    pub fn domain_b(&self) -> &AABB<RANK_B> {
        &self.domain_b
    }

    pub fn collections(&self) -> CollectionPair<'a, CA, CB> {
        self.collections
    }

    pub fn pipeline(&self) -> &Pipeline<SA, SB> {
        &self.pipeline
    }

    pub fn distance_fn(&self) -> &F {
        &self.distance
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `p in domain_a` and `q in domain_b`.
    #[inline]
    pub fn contains(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> bool {
        self.domain_a.contains(p) && self.domain_b.contains(q)
    }

    fn check_bounds(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Result<()> {
        if self.contains(p, q) {
            return Ok(());
        }
        Err(PairwiseError::out_of_bounds(
            &join_index(p, q),
            &format!("{} x {}", self.domain_a, self.domain_b),
        ))
    }

    /// Run the pipeline and the distance, ignoring the store.
    /// Bounds are the caller's problem.
    #[inline]
    pub fn evaluate_uncached(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Result<T> {
        let (operand_a, operand_b) = self.pipeline.evaluate(self.collections, p, q)?;
        Ok(self.distance.distance(&operand_a, &operand_b))
    }

    /// Value at `(p, q)`, computed at most once per in-window cell.
    pub fn read(&self, p: &Coord<RANK_A>, q: &Coord<RANK_B>) -> Result<T> {
        self.check_bounds(p, q)?;
        if !S::ENABLED {
            return self.evaluate_uncached(p, q);
        }
        match self.store.lookup(p, q) {
            Lookup::Hit(value) => Ok(value),
            Lookup::Miss(slot) => {
                let value = self.evaluate_uncached(p, q)?;
                self.store.fill(slot, value);
                Ok(value)
            }
            Lookup::Bypass => self.evaluate_uncached(p, q),
        }
    }

    /// `read` on a flat `p ++ q` tuple.
    pub fn read_flat(&self, flat_index: &[i32]) -> Result<T> {
        let (p, q) = split_index::<RANK_A, RANK_B>(flat_index)?;
        self.read(&p, &q)
    }

    /// Every `(p, q)` pair in row-major order.
    pub fn pair_iter(
        &self,
    ) -> impl Iterator<Item = (Coord<RANK_A>, Coord<RANK_B>)> + '_ {
        self.domain_a.coord_iter().flat_map(move |p| {
            self.domain_b.coord_iter().map(move |q| (p, q))
        })
    }

    pub fn print_report(&self) {
        println!("Pairwise Array Report:");
        println!("  - domain a: {}", self.domain_a);
        println!("  - domain b: {}", self.domain_b);
        println!("  - shape: {:?}", concat_shape(&self.domain_a, &self.domain_b));
        println!("  - caching: {}", S::ENABLED);
    }
}

impl<'a, CA, CB, SA, SB, F, S, T, const RANK_A: usize, const RANK_B: usize>
    PairwiseArray<'a, CA, CB, SA, SB, F, S, RANK_A, RANK_B>
where
    CA: Collection<RANK_A>,
    CB: Collection<RANK_B>,
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    S: CacheStore<RANK_A, RANK_B, Value = T>,
    T: Copy,
{
    /// Use each collection's own AABB as its index domain.
    pub fn from_collections<CS>(
        collections: CollectionPair<'a, CA, CB>,
        pipeline: Pipeline<SA, SB>,
        distance: F,
        strategy: &CS,
    ) -> Result<Self>
    where
        CS: CacheStrategy<RANK_A, RANK_B, Store<T> = S>,
    {
        Self::new(
            *collections.a.aabb(),
            *collections.b.aabb(),
            collections,
            pipeline,
            distance,
            strategy,
        )
    }
}

impl<'a, CA, CB, SA, SB, F, T, const RANK_A: usize, const RANK_B: usize>
    PairwiseArray<'a, CA, CB, SA, SB, F, NullStore<T>, RANK_A, RANK_B>
where
    CA: Collection<RANK_A>,
    CB: Collection<RANK_B>,
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    T: Copy,
{
    /// No caching, domains taken from the collections.
    pub fn uncached(
        collections: CollectionPair<'a, CA, CB>,
        pipeline: Pipeline<SA, SB>,
        distance: F,
    ) -> Result<Self> {
        Self::from_collections(collections, pipeline, distance, &NullCache)
    }
}

impl<'a, CA, CB, SA, SB, F, S, T, const RANK_A: usize, const RANK_B: usize> LazyArray
    for PairwiseArray<'a, CA, CB, SA, SB, F, S, RANK_A, RANK_B>
where
    SA: Extract<'a, CA, RANK_A>,
    SB: Extract<'a, CB, RANK_B>,
    F: Distance<SA::Operand, SB::Operand, Output = T>,
    S: CacheStore<RANK_A, RANK_B, Value = T>,
    T: Copy,
{
    type Elem = T;

    fn shape(&self) -> Vec<usize> {
        concat_shape(&self.domain_a, &self.domain_b)
    }

    fn ranges(&self) -> Vec<(i32, i32)> {
        self.domain_a
            .ranges()
            .into_iter()
            .chain(self.domain_b.ranges())
            .collect()
    }

    fn get(&self, flat_index: &[i32]) -> Result<T> {
        self.read_flat(flat_index)
    }
}
