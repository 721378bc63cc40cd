//! Movement system - falling powders, flowing liquids and rising gases

use super::tile::Motion;
use super::{SimStats, TileId, TileSpace, WorldRng};
use crate::simulation::Materials;

/// Failed attempts after which a settled tile retries only every 4th tick
pub const MAX_UPDATE_SKIP: u8 = 3;

/// Moves movable tiles along their material's candidate directions
pub struct MovementSystem;

impl MovementSystem {
    /// Try to move one tile
    ///
    /// Tiles already moved this tick (as the passive side of a swap) are
    /// skipped. Materials with several orderings draw one on every call,
    /// including calls spent cooling down.
    pub(crate) fn update_tile<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        materials: &Materials,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let tick = space.tick();
        let Some(tile) = space.tile(id) else {
            return;
        };
        if !tile.active || tile.last_update == Some(tick) {
            return;
        }
        let (pos, density) = (tile.pos, tile.density);
        let Some(movement) = &materials.get(tile.material).movement else {
            return;
        };

        let ordering = match movement.orderings.as_slice() {
            [only] => only,
            orderings => {
                let pick = rng.next_below(orderings.len() as u32) as usize;
                match orderings.get(pick) {
                    Some(ordering) => ordering,
                    None => return,
                }
            }
        };

        let Some(motion) = space.tile_mut(id).and_then(|tile| tile.motion.as_mut()) else {
            return;
        };
        if motion.cooldown > 0 {
            motion.cooldown -= 1;
            return;
        }

        for &dir in ordering {
            let Some(dest) = space.neighbor(pos, dir) else {
                continue;
            };
            let moved = match space.occupant(dest) {
                None => {
                    space.move_to(id, dest);
                    true
                }
                Some(other) => {
                    let displaceable = space
                        .tile(other)
                        .is_some_and(|occupant| occupant.active && occupant.density < density);
                    if displaceable {
                        space.swap(id, other);
                    }
                    displaceable
                }
            };

            if moved {
                if let Some(tile) = space.tile_mut(id) {
                    tile.last_update = Some(tick);
                    tile.motion = Some(Motion::default());
                }
                stats.record_tile_moved();
                return;
            }
        }

        if let Some(motion) = space.tile_mut(id).and_then(|tile| tile.motion.as_mut()) {
            motion.skip = (motion.skip + 1).min(MAX_UPDATE_SKIP);
            motion.cooldown = motion.skip;
        }
    }
}
