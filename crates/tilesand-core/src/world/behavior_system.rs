//! Custom behavior system - fire, grey goo, acid and explosions

use glam::IVec2;

use super::tile::BehaviorState;
use super::{SimStats, TileId, TileSpace, WorldRng};
use crate::simulation::{Behavior, Direction, MaterialDef, MaterialId, Materials};
use tilesand_simulation::IGNITER_PATTERNS;

/// Runs the per-tick behavior of tiles whose material declares one
pub struct CustomBehaviorSystem;

impl CustomBehaviorSystem {
    pub(crate) fn update_tile<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        materials: &Materials,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let Some(tile) = space.tile(id).filter(|tile| tile.active) else {
            return;
        };
        let (pos, state) = (tile.pos, tile.behavior);
        let material = materials.get(tile.material);
        let Some(behavior) = material.behavior else {
            return;
        };

        match (behavior, state) {
            (
                Behavior::Igniter {
                    heat_injection,
                    burn_cost,
                    ..
                },
                Some(BehaviorState::Igniter { lifetime }),
            ) => Self::update_igniter(
                space,
                id,
                pos,
                lifetime,
                heat_injection,
                burn_cost,
                rng,
                stats,
            ),
            (Behavior::Contagion, _) => Self::update_contagion(space, pos, material, rng, stats),
            (Behavior::Corrosive { chance }, _) => {
                Self::update_corrosive(space, id, pos, material.id, chance, rng, stats)
            }
            (
                Behavior::Explosive { residue, .. },
                Some(BehaviorState::Explosive { range, delay }),
            ) => Self::update_explosive(
                space, id, pos, material, range, delay, residue, materials, rng, stats,
            ),
            _ => {}
        }
    }

    /// Wander along one random upward pattern, heating the first thermal
    /// tile met instead of moving
    #[allow(clippy::too_many_arguments)]
    fn update_igniter<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        pos: IVec2,
        mut lifetime: i32,
        heat_injection: i32,
        burn_cost: i32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let pick = rng.next_below(IGNITER_PATTERNS.len() as u32) as usize;
        let pattern = IGNITER_PATTERNS.get(pick).copied().unwrap_or_default();

        for &dir in pattern {
            let Some(dest) = space.neighbor(pos, dir) else {
                continue;
            };
            match space.occupant(dest) {
                None => {
                    space.move_to(id, dest);
                    stats.record_tile_moved();
                    break;
                }
                Some(other) => {
                    let Some(target) = space
                        .tile_mut(other)
                        .filter(|target| target.active && target.heat.is_some())
                    else {
                        continue;
                    };
                    target.heat = target.heat.map(|heat| heat.saturating_add(heat_injection));
                    lifetime -= burn_cost;
                    stats.record_reaction();
                    break;
                }
            }
        }

        lifetime -= 1;
        if let Some(tile) = space.tile_mut(id) {
            tile.behavior = Some(BehaviorState::Igniter { lifetime });
        }
        if lifetime <= 0 {
            space.remove(id);
        }
    }

    /// Convert every active neighbor of another material
    fn update_contagion<R: WorldRng>(
        space: &mut TileSpace,
        pos: IVec2,
        material: &MaterialDef,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        for dir in Direction::ALL {
            let Some(neighbor_pos) = space.neighbor(pos, dir) else {
                continue;
            };
            let Some((neighbor_id, neighbor)) = space.active_at(neighbor_pos) else {
                continue;
            };
            if neighbor.material == material.id {
                continue;
            }
            if space.transform(neighbor_id, material, rng, false) {
                stats.record_reaction();
            }
        }
    }

    /// With probability `1 / chance`, dissolve the first foreign neighbor
    /// together with this tile
    fn update_corrosive<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        pos: IVec2,
        material: MaterialId,
        chance: u32,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if !rng.one_in(chance) {
            return;
        }

        let victim = Direction::ALL.into_iter().find_map(|dir| {
            let neighbor_pos = space.neighbor(pos, dir)?;
            let (neighbor_id, neighbor) = space.active_at(neighbor_pos)?;
            (neighbor.material != material).then_some(neighbor_id)
        });

        if let Some(victim) = victim {
            space.remove(victim);
            space.remove(id);
            stats.record_reaction();
        }
    }

    /// Count down the delay, then expand one ring or settle into residue
    #[allow(clippy::too_many_arguments)]
    fn update_explosive<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        pos: IVec2,
        material: &MaterialDef,
        range: u32,
        delay: u32,
        residue: Option<MaterialId>,
        materials: &Materials,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if delay > 0 {
            if let Some(tile) = space.tile_mut(id) {
                tile.behavior = Some(BehaviorState::Explosive {
                    range,
                    delay: delay - 1,
                });
            }
            return;
        }

        if range > 0 {
            for dir in Direction::CARDINAL {
                let Some(dest) = space.neighbor(pos, dir) else {
                    continue;
                };
                if let Some((occupant, tile)) = space.active_at(dest) {
                    if tile.material == material.id {
                        continue;
                    }
                    space.remove(occupant);
                }

                let child = space.spawn(material, dest, rng);
                if let Some(BehaviorState::Explosive { range: child_range, .. }) =
                    child.behavior.as_mut()
                {
                    *child_range = range - 1;
                }
            }
        } else if let Some(residue) = residue {
            space.spawn(materials.get(residue), pos, rng);
        }

        space.remove(id);
        stats.record_reaction();
    }
}
