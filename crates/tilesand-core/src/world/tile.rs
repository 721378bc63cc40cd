//! Tile instances and the generational arena that owns them

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::WorldRng;
use crate::simulation::{Behavior, ColorSpec, MaterialDef, MaterialId};

/// Handle to a tile in the [`TileStore`]
///
/// A handle outlives its tile safely: once the slot is reused the generation
/// no longer matches and lookups return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Per-instance state of a movable tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Motion {
    /// Consecutive failed attempts, capped by the movement system
    pub skip: u8,
    /// Ticks left before the next attempt
    pub cooldown: u8,
}

/// Per-instance state of a custom behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BehaviorState {
    Stateless,
    Igniter { lifetime: i32 },
    Explosive { range: u32, delay: u32 },
}

#[derive(Clone, Debug)]
pub(crate) struct Tile {
    pub material: MaterialId,
    pub pos: IVec2,
    pub color: [u8; 3],
    pub density: i32,
    pub active: bool,
    /// Tick of the last move, `None` until the tile first moves
    pub last_update: Option<u64>,
    pub motion: Option<Motion>,
    pub heat: Option<i32>,
    pub behavior: Option<BehaviorState>,
}

/// `0..variation` drawn only when there is something to draw
fn roll<R: WorldRng>(rng: &mut R, variation: u32) -> u32 {
    if variation == 0 {
        0
    } else {
        rng.next_below(variation)
    }
}

fn roll_color<R: WorldRng>(spec: &ColorSpec, rng: &mut R) -> [u8; 3] {
    let mut color = spec.base;
    for (channel, &variation) in color.iter_mut().zip(spec.variation.iter()) {
        let magnitude = roll(rng, variation.unsigned_abs().into()) as i32;
        let offset = i32::from(variation.signum()) * magnitude;
        *channel = (i32::from(*channel) + offset).clamp(0, 255) as u8;
    }
    color
}

impl Tile {
    /// New active tile of `material` at `pos`
    ///
    /// Draws from `rng` in a fixed order: color channels, heat, lifetime.
    pub fn new<R: WorldRng>(material: &MaterialDef, pos: IVec2, rng: &mut R) -> Self {
        let color = roll_color(&material.color, rng);
        let heat = material
            .thermal
            .map(|thermal| thermal.base_heat + roll(rng, thermal.heat_variation) as i32);
        let behavior = material.behavior.map(|behavior| match behavior {
            Behavior::Igniter {
                lifetime,
                lifetime_variation,
                ..
            } => BehaviorState::Igniter {
                lifetime: lifetime + roll(rng, lifetime_variation) as i32,
            },
            Behavior::Explosive { range, delay, .. } => BehaviorState::Explosive { range, delay },
            Behavior::Contagion | Behavior::Corrosive { .. } => BehaviorState::Stateless,
        });

        Self {
            material: material.id,
            pos,
            color,
            density: material.density,
            active: true,
            last_update: None,
            motion: material.movement.as_ref().map(|_| Motion::default()),
            heat,
            behavior,
        }
    }

    pub fn view(&self) -> TileView {
        TileView {
            material: self.material,
            color: self.color,
            heat: self.heat,
        }
    }
}

/// Read-only snapshot of a tile for rendering and inspection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub material: MaterialId,
    pub color: [u8; 3],
    /// Present for thermal tiles only
    pub heat: Option<i32>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

/// Generational arena owning every live tile
#[derive(Clone, Debug, Default)]
pub(crate) struct TileStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl TileStore {
    pub fn insert(&mut self, tile: Tile) -> TileId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.tile = Some(tile);
                TileId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    tile: Some(tile),
                });
                TileId::new((self.slots.len() - 1) as u32, 0)
            }
        }
    }

    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let tile = slot.tile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(tile)
    }

    #[inline]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tile.as_mut())
    }

    #[cfg(test)]
    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.tile
                .as_ref()
                .map(|tile| (TileId::new(index as u32, slot.generation), tile))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Materials;

    /// Replays a fixed list of draws, recording the bounds asked for
    struct TestRng {
        values: Vec<u32>,
        bounds: Vec<u32>,
    }

    impl TestRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                bounds: Vec::new(),
            }
        }
    }

    impl WorldRng for TestRng {
        fn next_below(&mut self, bound: u32) -> u32 {
            self.bounds.push(bound);
            let value = if self.values.is_empty() {
                0
            } else {
                self.values.remove(0)
            };
            value % bound.max(1)
        }
    }

    #[test]
    fn test_new_tile_rolls_color_then_heat() {
        let materials = Materials::builtin();
        // vapor: color variation (-20, -20, -20), heat 220 + rand(120)
        let vapor = materials.get(MaterialId::VAPOR);
        let mut rng = TestRng::new(&[1, 2, 3, 50]);

        let tile = Tile::new(vapor, IVec2::new(3, 4), &mut rng);
        assert_eq!(tile.color, [254, 253, 252]);
        assert_eq!(tile.heat, Some(270));
        assert_eq!(rng.bounds, vec![20, 20, 20, 120]);
        assert!(tile.motion.is_some());
        assert!(tile.behavior.is_none());
        assert_eq!(tile.last_update, None);
    }

    #[test]
    fn test_zero_variation_draws_nothing() {
        let materials = Materials::builtin();
        let goo = materials.get(MaterialId::GREY_GOO);
        let mut rng = TestRng::new(&[]);

        let tile = Tile::new(goo, IVec2::ZERO, &mut rng);
        assert_eq!(tile.color, [180, 180, 180]);
        assert!(rng.bounds.is_empty());
        assert_eq!(tile.behavior, Some(BehaviorState::Stateless));
        assert_eq!(tile.heat, None);
    }

    #[test]
    fn test_fire_lifetime_rolled_last() {
        let materials = Materials::builtin();
        let fire = materials.get(MaterialId::FIRE);
        let mut rng = TestRng::new(&[0, 0, 7]);

        let tile = Tile::new(fire, IVec2::ZERO, &mut rng);
        assert_eq!(rng.bounds, vec![20, 20, 180]);
        assert_eq!(tile.behavior, Some(BehaviorState::Igniter { lifetime: 187 }));
    }

    #[test]
    fn test_explosion_state() {
        let materials = Materials::builtin();
        let mut rng = TestRng::new(&[]);
        let tile = Tile::new(materials.get(MaterialId::EXPLOSION), IVec2::ZERO, &mut rng);
        assert_eq!(
            tile.behavior,
            Some(BehaviorState::Explosive { range: 10, delay: 2 })
        );
        assert_eq!(tile.heat, Some(2000));
        assert_eq!(tile.density, 10_000);
    }

    #[test]
    fn test_view_snapshot() {
        let materials = Materials::builtin();
        let mut rng = TestRng::new(&[]);
        let tile = Tile::new(materials.get(MaterialId::WOOD), IVec2::ZERO, &mut rng);
        let view = tile.view();
        assert_eq!(view.material, MaterialId::WOOD);
        assert_eq!(view.heat, Some(25));
    }

    #[test]
    fn test_store_reuses_slots_with_new_generation() {
        let materials = Materials::builtin();
        let mut rng = TestRng::new(&[]);
        let sand = materials.get(MaterialId::SAND);

        let mut store = TileStore::default();
        let first = store.insert(Tile::new(sand, IVec2::ZERO, &mut rng));
        let second = store.insert(Tile::new(sand, IVec2::X, &mut rng));
        assert_eq!(store.len(), 2);

        assert!(store.remove(first).is_some());
        assert!(!store.contains(first));
        assert!(store.remove(first).is_none());
        assert_eq!(store.len(), 1);

        let third = store.insert(Tile::new(sand, IVec2::Y, &mut rng));
        assert_ne!(third, first);
        assert!(store.get(first).is_none());
        assert_eq!(store.get(third).map(|tile| tile.pos), Some(IVec2::Y));
        assert!(store.contains(second));
        assert_eq!(store.iter().count(), 2);
    }
}
