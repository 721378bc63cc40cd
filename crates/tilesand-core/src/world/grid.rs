//! Fixed-size occupancy grid

use glam::IVec2;

use super::TileId;

/// Width x height array of optional tile handles, row-major
///
/// Every accessor bounds-checks its coordinates; out-of-bounds reads are
/// empty and out-of-bounds writes are ignored.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    width: i32,
    height: i32,
    cells: Vec<Option<TileId>>,
}

impl SpatialGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    #[inline]
    pub fn get(&self, pos: IVec2) -> Option<TileId> {
        self.index(pos).and_then(|index| self.cells[index])
    }

    /// Store `tile` at `pos`, returning what was there before
    pub(crate) fn set(&mut self, pos: IVec2, tile: Option<TileId>) -> Option<TileId> {
        match self.index(pos) {
            Some(index) => std::mem::replace(&mut self.cells[index], tile),
            None => None,
        }
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (IVec2, TileId)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|id| {
                let index = index as i32;
                (IVec2::new(index % width, index / width), id)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> TileId {
        TileId::new(index, 0)
    }

    #[test]
    fn test_bounds() {
        let grid = SpatialGrid::new(4, 3);
        assert!(grid.in_bounds(IVec2::new(0, 0)));
        assert!(grid.in_bounds(IVec2::new(3, 2)));
        assert!(!grid.in_bounds(IVec2::new(4, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, 3)));
        assert!(!grid.in_bounds(IVec2::new(-1, 1)));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = SpatialGrid::new(4, 3);
        let pos = IVec2::new(2, 1);
        assert_eq!(grid.get(pos), None);
        assert_eq!(grid.set(pos, Some(id(5))), None);
        assert_eq!(grid.get(pos), Some(id(5)));
        assert_eq!(grid.set(pos, None), Some(id(5)));
        assert_eq!(grid.get(pos), None);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut grid = SpatialGrid::new(2, 2);
        assert_eq!(grid.set(IVec2::new(5, 5), Some(id(1))), None);
        assert_eq!(grid.get(IVec2::new(5, 5)), None);
        assert_eq!(grid.occupied().count(), 0);
    }

    #[test]
    fn test_occupied_reports_positions() {
        let mut grid = SpatialGrid::new(3, 3);
        grid.set(IVec2::new(2, 0), Some(id(1)));
        grid.set(IVec2::new(0, 2), Some(id(2)));

        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(
            occupied,
            vec![(IVec2::new(2, 0), id(1)), (IVec2::new(0, 2), id(2))]
        );
    }

    #[test]
    fn test_negative_dimensions_clamp_to_empty() {
        let grid = SpatialGrid::new(-3, 5);
        assert_eq!(grid.width(), 0);
        assert!(!grid.in_bounds(IVec2::ZERO));
    }
}
