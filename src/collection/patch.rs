use super::*;

/// Zero-copy window onto a region of a dense collection.
/// Coordinates stay in the parent's world space.
#[derive(Debug, Clone, Copy)]
pub struct PatchView<'a, const GRID_DIMENSION: usize, T> {
    region: AABB<GRID_DIMENSION>,
    parent: AABB<GRID_DIMENSION>,
    buffer: &'a [T],
}

impl<'a, const GRID_DIMENSION: usize, T: Copy> PatchView<'a, GRID_DIMENSION, T> {
    /// Fails with `IndexOutOfBounds` rather than clamping when `region`
    /// leaves `parent`.
    pub fn new(
        region: AABB<GRID_DIMENSION>,
        parent: AABB<GRID_DIMENSION>,
        buffer: &'a [T],
    ) -> Result<Self> {
        debug_assert!(buffer.len() >= parent.buffer_size());
        if !region.check_validity() {
            return Err(PairwiseError::configuration(format!(
                "patch region {} is inverted",
                region
            )));
        }
        if !parent.contains_aabb(&region) {
            let corner = if parent.contains(&region.min()) {
                region.max()
            } else {
                region.min()
            };
            return Err(PairwiseError::out_of_bounds(corner.as_slice(), &parent));
        }
        Ok(PatchView {
            region,
            parent,
            buffer,
        })
    }

    pub fn region(&self) -> &AABB<GRID_DIMENSION> {
        &self.region
    }

    pub fn len(&self) -> usize {
        self.region.buffer_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values().collect()
    }
}

impl<'a, const GRID_DIMENSION: usize, T: Copy> Collection<GRID_DIMENSION>
    for PatchView<'a, GRID_DIMENSION, T>
{
    type Elem = T;

    fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.region
    }

    #[track_caller]
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> T {
        debug_assert!(
            self.region.contains(world_coord),
            "{:?} does not contain {:?}",
            self.region,
            world_coord
        );
        self.buffer[self.parent.coord_to_linear(world_coord)]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn grid() -> OwnedCollection<2, i32> {
        OwnedCollection::from_fn(AABB::new(matrix![1, 10; 1, 10]), |c| {
            c[0] * 100 + c[1]
        })
    }

    #[test]
    fn patch_values_test() {
        let g = grid();
        let p = g.patch(&AABB::new(matrix![2, 3; 5, 6])).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.to_vec(), vec![205, 206, 305, 306]);
        assert_eq!(p.view(&vector![3, 5]), 305);
        assert!(p.get(&vector![4, 5]).is_err());
    }

    #[test]
    fn patch_outside_parent_test() {
        let g = grid();
        {
            let e = g.patch(&AABB::new(matrix![0, 2; 5, 6])).unwrap_err();
            assert_eq!(
                e,
                PairwiseError::IndexOutOfBounds {
                    coord: vec![0, 5],
                    bounds: "[1..=10, 1..=10]".to_string(),
                }
            );
        }

        {
            let e = g.patch(&AABB::new(matrix![9, 11; 5, 6])).unwrap_err();
            assert!(e.is_out_of_bounds());
        }
    }
}
