use super::*;

/// Borrowed row-major buffer interpreted over an AABB.
pub struct SliceCollection<'a, const GRID_DIMENSION: usize, T> {
    pub(super) aabb: AABB<GRID_DIMENSION>,
    pub(super) buffer: &'a [T],
}

impl<'a, const GRID_DIMENSION: usize, T: Copy> SliceCollection<'a, GRID_DIMENSION, T> {
    pub fn new(aabb: AABB<GRID_DIMENSION>, buffer: &'a [T]) -> Result<Self> {
        if buffer.len() < aabb.buffer_size() {
            return Err(PairwiseError::configuration(format!(
                "slice of length {} is too short for {}",
                buffer.len(),
                aabb
            )));
        }
        Ok(SliceCollection {
            aabb,
            buffer: &buffer[0..aabb.buffer_size()],
        })
    }
}

impl<'a, const GRID_DIMENSION: usize, T: Copy> Collection<GRID_DIMENSION>
    for SliceCollection<'a, GRID_DIMENSION, T>
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

impl<'a, const GRID_DIMENSION: usize, T: Copy> DenseCollection<GRID_DIMENSION>
    for SliceCollection<'a, GRID_DIMENSION, T>
{
    fn buffer(&self) -> &[T] {
        self.buffer
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn slice_collection_test() {
        let data: Vec<i32> = (0..12).collect();
        let c = SliceCollection::new(AABB::new(matrix![1, 3; 1, 4]), &data)
            .unwrap();
        assert_eq!(c.view(&vector![1, 1]), 0);
        assert_eq!(c.view(&vector![2, 1]), 4);
        assert_eq!(c.view(&vector![3, 4]), 11);

        let short = SliceCollection::new(AABB::new(matrix![0, 12]), &data);
        assert!(short.is_err());
    }
}
