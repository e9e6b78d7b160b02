use super::*;

pub struct OwnedCollection<const GRID_DIMENSION: usize, T> {
    aabb: AABB<GRID_DIMENSION>,
    buffer: Vec<T>,
}

impl<const GRID_DIMENSION: usize, T: Copy> OwnedCollection<GRID_DIMENSION, T> {
    /// Take ownership of a row-major buffer covering `aabb`.
    pub fn new(aabb: AABB<GRID_DIMENSION>, buffer: Vec<T>) -> Result<Self> {
        if buffer.len() != aabb.buffer_size() {
            return Err(PairwiseError::configuration(format!(
                "buffer of length {} cannot back {} ({} entries)",
                buffer.len(),
                aabb,
                aabb.buffer_size()
            )));
        }
        Ok(OwnedCollection { aabb, buffer })
    }

    pub fn filled(aabb: AABB<GRID_DIMENSION>, value: T) -> Self {
        OwnedCollection {
            aabb,
            buffer: vec![value; aabb.buffer_size()],
        }
    }

    pub fn from_fn<F: FnMut(Coord<GRID_DIMENSION>) -> T>(
        aabb: AABB<GRID_DIMENSION>,
        f: F,
    ) -> Self {
        let buffer = aabb.coord_iter().map(f).collect();
        OwnedCollection { aabb, buffer }
    }

    /// Overwrite every value, only possible while nothing borrows us.
    pub fn set_values<F: FnMut(Coord<GRID_DIMENSION>) -> T>(&mut self, mut f: F) {
        let aabb = self.aabb;
        for (i, value_mut) in self.buffer.iter_mut().enumerate() {
            *value_mut = f(aabb.linear_to_coord(i));
        }
    }

    pub fn as_slice_collection(&self) -> SliceCollection<'_, GRID_DIMENSION, T> {
        SliceCollection {
            aabb: self.aabb,
            buffer: &self.buffer,
        }
    }
}

impl<const GRID_DIMENSION: usize, T: Copy> Collection<GRID_DIMENSION>
    for OwnedCollection<GRID_DIMENSION, T>
{
    type Elem = T;

    fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.aabb
    }

    #[track_caller]
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> T {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index]
    }
}

impl<const GRID_DIMENSION: usize, T: Copy> DenseCollection<GRID_DIMENSION>
    for OwnedCollection<GRID_DIMENSION, T>
{
    fn buffer(&self) -> &[T] {
        &self.buffer
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn new_checks_length_test() {
        let aabb = AABB::new(matrix![1, 6]);
        assert!(OwnedCollection::new(aabb, vec![0.0; 6]).is_ok());
        let e = OwnedCollection::new(aabb, vec![0.0; 5]).err().unwrap();
        assert!(matches!(e, PairwiseError::Configuration(_)));
    }

    #[test]
    fn set_values_test() {
        let aabb = AABB::new(matrix![0, 9; 0, 9]);
        let mut c = OwnedCollection::filled(aabb, 0.0);
        c.set_values(|coord| (coord[0] + 3 * coord[1]) as f64);
        for coord in aabb.coord_iter() {
            assert_eq!(c.view(&coord), (coord[0] + 3 * coord[1]) as f64);
        }
    }

    #[test]
    fn slice_shares_buffer_test() {
        let c = OwnedCollection::from_fn(AABB::new(matrix![0, 3]), |c| c[0]);
        let s = c.as_slice_collection();
        assert_eq!(s.buffer().as_ptr(), c.buffer().as_ptr());
        assert_eq!(s.view(&vector![2]), 2);
    }
}
