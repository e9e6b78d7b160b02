use super::*;

/// The two backing collections of a pairwise array.
/// A single collection may serve both sides.
pub struct CollectionPair<'a, CA, CB> {
    pub a: &'a CA,
    pub b: &'a CB,
}

impl<'a, CA, CB> Clone for CollectionPair<'a, CA, CB> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, CA, CB> Copy for CollectionPair<'a, CA, CB> {}

impl<'a, CA, CB> CollectionPair<'a, CA, CB> {
    pub fn new(a: &'a CA, b: &'a CB) -> Self {
        CollectionPair { a, b }
    }
}

impl<'a, C> CollectionPair<'a, C, C> {
    /// Distances of a collection against itself.
    pub fn shared(c: &'a C) -> Self {
        CollectionPair { a: c, b: c }
    }

    /// Accepts one collection (used for both sides) or two.
    pub fn try_from_slice(collections: &[&'a C]) -> Result<Self> {
        match collections {
            [c] => Ok(Self::shared(*c)),
            [a, b] => Ok(Self::new(*a, *b)),
            _ => Err(PairwiseError::configuration(format!(
                "expected one or two backing collections, got {}",
                collections.len()
            ))),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn try_from_slice_test() {
        let a = OwnedCollection::filled(AABB::new(matrix![0, 3]), 1);
        let b = OwnedCollection::filled(AABB::new(matrix![0, 5]), 2);

        {
            let pair = CollectionPair::try_from_slice(&[&a]).unwrap();
            assert!(std::ptr::eq(pair.a, pair.b));
        }

        {
            let pair = CollectionPair::try_from_slice(&[&a, &b]).unwrap();
            assert_eq!(pair.b.aabb().buffer_size(), 6);
        }

        {
            let e = CollectionPair::try_from_slice(&[&a, &b, &a]);
            assert!(matches!(e, Err(PairwiseError::Configuration(_))));
        }

        {
            let e = CollectionPair::<OwnedCollection<1, i32>, _>::try_from_slice(
                &[],
            );
            assert!(e.is_err());
        }
    }
}
