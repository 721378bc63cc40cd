//! Grid, tile arena and deferred change queues shared by all systems

use glam::IVec2;

use super::tile::{Tile, TileStore};
use super::{SpatialGrid, TileId, WorldRng};
use crate::simulation::{Direction, MaterialDef};

/// The mutable state systems operate on during a tick
///
/// Structural changes are deferred: `remove` only deactivates and queues,
/// `spawn` only queues. Both take effect when the world commits.
#[derive(Debug)]
pub(crate) struct TileSpace {
    grid: SpatialGrid,
    store: TileStore,
    pending_add: Vec<Tile>,
    pending_delete: Vec<TileId>,
    tick: u64,
}

impl TileSpace {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: SpatialGrid::new(width, height),
            store: TileStore::default(),
            pending_add: Vec::new(),
            pending_delete: Vec::new(),
            tick: 0,
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.store.iter()
    }

    /// Cell next to `pos` in `dir`, if it is inside the grid
    #[inline]
    pub fn neighbor(&self, pos: IVec2, dir: Direction) -> Option<IVec2> {
        let next = pos + dir.offset();
        self.grid.in_bounds(next).then_some(next)
    }

    #[inline]
    pub fn occupant(&self, pos: IVec2) -> Option<TileId> {
        self.grid.get(pos)
    }

    #[inline]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.store.get(id)
    }

    #[inline]
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.store.get_mut(id)
    }

    /// Active occupant of `pos`
    #[inline]
    pub fn active_at(&self, pos: IVec2) -> Option<(TileId, &Tile)> {
        let id = self.grid.get(pos)?;
        self.store
            .get(id)
            .filter(|tile| tile.active)
            .map(|tile| (id, tile))
    }

    /// Deactivate `id` and queue it for deletion
    ///
    /// Returns false if the tile was already removed.
    pub fn remove(&mut self, id: TileId) -> bool {
        match self.store.get_mut(id) {
            Some(tile) if tile.active => {
                tile.active = false;
                self.pending_delete.push(id);
                true
            }
            _ => false,
        }
    }

    /// Construct a tile of `material` and queue it for addition
    pub fn spawn<R: WorldRng>(
        &mut self,
        material: &MaterialDef,
        pos: IVec2,
        rng: &mut R,
    ) -> &mut Tile {
        let index = self.pending_add.len();
        self.pending_add.push(Tile::new(material, pos, rng));
        &mut self.pending_add[index]
    }

    /// Replace `id` with a new tile of `material` at the same cell
    ///
    /// With `carry_heat`, a thermal successor starts at the old tile's heat.
    pub fn transform<R: WorldRng>(
        &mut self,
        id: TileId,
        material: &MaterialDef,
        rng: &mut R,
        carry_heat: bool,
    ) -> bool {
        let Some(old) = self.store.get(id) else {
            return false;
        };
        let (pos, old_heat) = (old.pos, old.heat);
        if !self.remove(id) {
            return false;
        }

        let tile = self.spawn(material, pos, rng);
        if carry_heat && tile.heat.is_some() && old_heat.is_some() {
            tile.heat = old_heat;
        }
        true
    }

    /// Move `id` into the empty cell `dest`
    pub fn move_to(&mut self, id: TileId, dest: IVec2) {
        let Some(tile) = self.store.get_mut(id) else {
            return;
        };
        let from = std::mem::replace(&mut tile.pos, dest);
        self.grid.set(from, None);
        self.grid.set(dest, Some(id));
    }

    /// Exchange the cells of `id` and `other`
    ///
    /// `other` is stamped as updated this tick so it is not processed again.
    pub fn swap(&mut self, id: TileId, other: TileId) {
        let tick = self.tick;
        let (Some(a), Some(b)) = (
            self.store.get(id).map(|tile| tile.pos),
            self.store.get(other).map(|tile| tile.pos),
        ) else {
            return;
        };

        if let Some(tile) = self.store.get_mut(id) {
            tile.pos = b;
        }
        if let Some(tile) = self.store.get_mut(other) {
            tile.pos = a;
            tile.last_update = Some(tick);
        }
        self.grid.set(a, Some(other));
        self.grid.set(b, Some(id));
    }

    /// Place `tile` immediately; `None` if its cell is out of bounds or taken
    pub fn insert(&mut self, tile: Tile) -> Option<TileId> {
        let pos = tile.pos;
        if !self.grid.in_bounds(pos) || self.grid.get(pos).is_some() {
            return None;
        }
        let id = self.store.insert(tile);
        self.grid.set(pos, Some(id));
        Some(id)
    }

    /// Free `id` from the arena and clear its cell
    pub fn erase(&mut self, id: TileId) -> Option<Tile> {
        let tile = self.store.remove(id)?;
        if self.grid.get(tile.pos) == Some(id) {
            self.grid.set(tile.pos, None);
        }
        Some(tile)
    }

    pub fn take_deletions(&mut self) -> Vec<TileId> {
        std::mem::take(&mut self.pending_delete)
    }

    pub fn take_additions(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.pending_add)
    }

    #[cfg(test)]
    pub fn pending_additions(&self) -> &[Tile] {
        &self.pending_add
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{MaterialId, Materials};
    use crate::world::SemiRandom;

    fn space_with(
        materials: &Materials,
        placements: &[(MaterialId, i32, i32)],
    ) -> (TileSpace, Vec<TileId>) {
        let mut space = TileSpace::new(5, 5);
        let mut rng = SemiRandom::new(1);
        let ids = placements
            .iter()
            .map(|&(material, x, y)| {
                let tile = Tile::new(materials.get(material), IVec2::new(x, y), &mut rng);
                space.insert(tile).unwrap()
            })
            .collect();
        (space, ids)
    }

    #[test]
    fn test_insert_rejects_occupied_and_out_of_bounds() {
        let materials = Materials::builtin();
        let (mut space, _) = space_with(&materials, &[(MaterialId::SAND, 1, 1)]);
        let mut rng = SemiRandom::new(2);

        let taken = Tile::new(materials.get(MaterialId::ROCK), IVec2::new(1, 1), &mut rng);
        assert!(space.insert(taken).is_none());
        let outside = Tile::new(materials.get(MaterialId::ROCK), IVec2::new(9, 1), &mut rng);
        assert!(space.insert(outside).is_none());
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_neighbor_is_bounds_checked() {
        let space = TileSpace::new(3, 3);
        assert_eq!(
            space.neighbor(IVec2::new(1, 1), Direction::Down),
            Some(IVec2::new(1, 2))
        );
        assert_eq!(space.neighbor(IVec2::new(1, 2), Direction::Down), None);
        assert_eq!(space.neighbor(IVec2::new(0, 0), Direction::UpLeft), None);
    }

    #[test]
    fn test_remove_deactivates_once() {
        let materials = Materials::builtin();
        let (mut space, ids) = space_with(&materials, &[(MaterialId::SAND, 0, 0)]);

        assert!(space.remove(ids[0]));
        assert!(!space.remove(ids[0]));
        assert!(!space.tile(ids[0]).unwrap().active);
        // Still indexed until commit
        assert_eq!(space.occupant(IVec2::ZERO), Some(ids[0]));
        assert!(space.active_at(IVec2::ZERO).is_none());
        assert_eq!(space.take_deletions(), vec![ids[0]]);
    }

    #[test]
    fn test_transform_carries_heat_to_thermal_successor() {
        let materials = Materials::builtin();
        let (mut space, ids) = space_with(&materials, &[(MaterialId::WOOD, 2, 2)]);
        space.tile_mut(ids[0]).unwrap().heat = Some(600);
        let mut rng = SemiRandom::new(3);

        assert!(space.transform(ids[0], materials.get(MaterialId::BURNING_WOOD), &mut rng, true));
        assert!(!space.transform(ids[0], materials.get(MaterialId::ASH), &mut rng, true));

        let added = space.pending_additions();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].material, MaterialId::BURNING_WOOD);
        assert_eq!(added[0].pos, IVec2::new(2, 2));
        assert_eq!(added[0].heat, Some(600));
    }

    #[test]
    fn test_move_and_swap_keep_grid_consistent() {
        let materials = Materials::builtin();
        let (mut space, ids) = space_with(
            &materials,
            &[(MaterialId::SAND, 1, 1), (MaterialId::WATER, 1, 2)],
        );
        let (sand, water) = (ids[0], ids[1]);

        space.swap(sand, water);
        assert_eq!(space.occupant(IVec2::new(1, 2)), Some(sand));
        assert_eq!(space.occupant(IVec2::new(1, 1)), Some(water));
        assert_eq!(space.tile(sand).unwrap().pos, IVec2::new(1, 2));
        assert_eq!(space.tile(water).unwrap().pos, IVec2::new(1, 1));
        assert_eq!(space.tile(water).unwrap().last_update, Some(0));

        space.move_to(sand, IVec2::new(1, 3));
        assert_eq!(space.occupant(IVec2::new(1, 2)), None);
        assert_eq!(space.occupant(IVec2::new(1, 3)), Some(sand));
    }

    #[test]
    fn test_erase_clears_cell() {
        let materials = Materials::builtin();
        let (mut space, ids) = space_with(&materials, &[(MaterialId::ROCK, 4, 4)]);
        assert!(space.erase(ids[0]).is_some());
        assert_eq!(space.occupant(IVec2::new(4, 4)), None);
        assert!(space.erase(ids[0]).is_none());
        assert_eq!(space.len(), 0);
    }
}
