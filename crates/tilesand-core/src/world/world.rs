//! World - owns the grid, tile registries and the per-tick update loop

use glam::IVec2;
use std::sync::Arc;

use super::behavior_system::CustomBehaviorSystem;
use super::heat_system::HeatSystem;
use super::movement_system::MovementSystem;
use super::{DEFAULT_SEED, SemiRandom, SimStats, Tile, TileId, TileSpace, TileView, WorldStats};
use crate::simulation::{MaterialDef, MaterialId, Materials};

/// Tiles grouped by the capabilities their material declares
///
/// Deleted tiles linger here until the commit sweep; systems skip them by
/// their inactive flag.
#[derive(Debug, Default)]
struct Registries {
    moving: Vec<TileId>,
    thermal: Vec<TileId>,
    custom: Vec<TileId>,
}

impl Registries {
    fn register(&mut self, id: TileId, material: &MaterialDef) {
        if material.movement.is_some() {
            self.moving.push(id);
        }
        if material.thermal.is_some() {
            self.thermal.push(id);
        }
        if material.behavior.is_some() {
            self.custom.push(id);
        }
    }

    fn retain(&mut self, mut live: impl FnMut(TileId) -> bool) {
        self.moving.retain(|&id| live(id));
        self.thermal.retain(|&id| live(id));
        self.custom.retain(|&id| live(id));
    }

    fn count(&self, id: TileId) -> [usize; 3] {
        [&self.moving, &self.thermal, &self.custom]
            .map(|registry| registry.iter().filter(|&&other| other == id).count())
    }
}

/// A fixed-size tile world advanced one tick at a time
pub struct World {
    space: TileSpace,
    registries: Registries,
    materials: Arc<Materials>,
    rng: SemiRandom,
    seed: u64,
    stats: WorldStats,
}

impl World {
    /// Empty world using the built-in materials and [`DEFAULT_SEED`]
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_materials(width, height, Arc::new(Materials::builtin()), DEFAULT_SEED)
    }

    pub fn with_materials(width: i32, height: i32, materials: Arc<Materials>, seed: u64) -> Self {
        let space = TileSpace::new(width, height);
        log::info!(
            "Created {}x{} world with {} materials (seed {seed})",
            space.grid().width(),
            space.grid().height(),
            materials.len()
        );

        Self {
            space,
            registries: Registries::default(),
            materials,
            rng: SemiRandom::new(seed),
            seed,
            stats: WorldStats::default(),
        }
    }

    /// Drop every tile and restart from tick 0 with the same seed
    pub fn reset(&mut self) {
        let (width, height) = (self.width(), self.height());
        *self = Self::with_materials(width, height, Arc::clone(&self.materials), self.seed);
    }

    pub fn width(&self) -> i32 {
        self.space.grid().width()
    }

    pub fn height(&self) -> i32 {
        self.space.grid().height()
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.space.tick()
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Shared handle to the registry, for building sibling worlds
    pub fn materials_arc(&self) -> Arc<Materials> {
        Arc::clone(&self.materials)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    /// Zero the counters without touching tiles or the tick count
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Construct a tile of `material` at `(x, y)` and place it immediately
    ///
    /// Returns false, without touching the random source, when the cell is
    /// out of bounds or occupied, or the material is unknown.
    pub fn place(&mut self, material: MaterialId, x: i32, y: i32) -> bool {
        let pos = IVec2::new(x, y);
        if !self.space.grid().in_bounds(pos) || self.space.occupant(pos).is_some() {
            return false;
        }
        let Some(def) = self.materials.try_get(material) else {
            log::warn!("Ignoring placement of unknown material {material:?}");
            return false;
        };

        let tile = Tile::new(def, pos, &mut self.rng);
        match self.space.insert(tile) {
            Some(id) => {
                self.registries.register(id, def);
                true
            }
            None => false,
        }
    }

    /// Queue the tile at `(x, y)` for removal at the end of the next commit
    pub fn remove(&mut self, x: i32, y: i32) -> bool {
        match self.space.active_at(IVec2::new(x, y)) {
            Some((id, _)) => self.space.remove(id),
            None => false,
        }
    }

    /// Overwrite the heat of a thermal tile
    pub fn set_heat(&mut self, x: i32, y: i32, heat: i32) -> bool {
        self.update_heat(x, y, |_| heat)
    }

    /// Add `delta` to the heat of a thermal tile
    pub fn add_heat(&mut self, x: i32, y: i32, delta: i32) -> bool {
        self.update_heat(x, y, |heat| heat.saturating_add(delta))
    }

    fn update_heat(&mut self, x: i32, y: i32, update: impl FnOnce(i32) -> i32) -> bool {
        let Some((id, _)) = self.space.active_at(IVec2::new(x, y)) else {
            return false;
        };
        match self.space.tile_mut(id) {
            Some(tile) if tile.heat.is_some() => {
                tile.heat = tile.heat.map(update);
                true
            }
            _ => false,
        }
    }

    /// Snapshot of the active tile at `(x, y)`
    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileView> {
        self.space
            .active_at(IVec2::new(x, y))
            .map(|(_, tile)| tile.view())
    }

    /// Every active tile in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, TileView)> + '_ {
        self.space.grid().occupied().filter_map(|(pos, id)| {
            self.space
                .tile(id)
                .filter(|tile| tile.active)
                .map(|tile| (pos, tile.view()))
        })
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn count_material(&self, material: MaterialId) -> usize {
        self.tiles()
            .filter(|(_, tile)| tile.material == material)
            .count()
    }

    /// Advance the simulation by one step
    ///
    /// Movement, heat and custom behavior run in that order over their
    /// registries. Deletions, then additions, are committed afterwards.
    pub fn tick(&mut self) {
        let materials = &*self.materials;
        let (space, rng, stats) = (&mut self.space, &mut self.rng, &mut self.stats);

        for &id in &self.registries.moving {
            MovementSystem::update_tile(space, id, materials, rng, stats);
        }
        for &id in &self.registries.thermal {
            HeatSystem::update_tile(space, id, materials, rng, stats);
        }
        for &id in &self.registries.custom {
            CustomBehaviorSystem::update_tile(space, id, materials, rng, stats);
        }

        self.commit();
        self.space.advance_tick();
    }

    fn commit(&mut self) {
        let deletions = self.space.take_deletions();
        let deleted = deletions.len();
        for id in deletions {
            self.space.erase(id);
        }
        if deleted > 0 {
            let space = &self.space;
            self.registries.retain(|id| space.tile(id).is_some());
        }

        let additions = self.space.take_additions();
        let mut added = 0;
        for tile in additions {
            let (material, pos) = (tile.material, tile.pos);
            match self.space.insert(tile) {
                Some(id) => {
                    self.registries.register(id, self.materials.get(material));
                    added += 1;
                }
                None => {
                    log::debug!("Discarded {material:?} queued for occupied cell {pos}");
                    self.stats.record_discarded();
                }
            }
        }

        if deleted > 0 || added > 0 {
            log::debug!(
                "Tick {}: removed {deleted}, added {added}, {} tiles live",
                self.space.tick(),
                self.space.len()
            );
        }
    }

    /// Verify grid, arena and registries agree with each other
    ///
    /// Every stored tile sits in the grid at its own position and appears
    /// exactly once in each registry its material calls for, and nowhere else.
    pub fn is_consistent(&self) -> bool {
        let grid = self.space.grid();
        let indexed = grid.occupied().count();
        if indexed != self.space.len() {
            return false;
        }

        self.space.tiles().all(|(id, tile)| {
            let material = self.materials.get(tile.material);
            let expected = [
                usize::from(material.movement.is_some()),
                usize::from(material.thermal.is_some()),
                usize::from(material.behavior.is_some()),
            ];
            grid.in_bounds(tile.pos)
                && grid.get(tile.pos) == Some(id)
                && self.registries.count(id) == expected
        })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(160, 90)
    }
}
