//! Heat system - passive heat delta, neighbor diffusion and phase transitions

use super::{SimStats, TileId, TileSpace, WorldRng};
use crate::simulation::{Direction, Materials, StateChangeSystem, exchanged_heat};

pub struct HeatSystem;

impl HeatSystem {
    /// Diffuse heat between one thermal tile and its 8 neighbors, then check
    /// its thresholds
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
        let (Some(mut heat), Some(thermal)) = (tile.heat, materials.get(tile.material).thermal)
        else {
            return;
        };
        let pos = tile.pos;

        heat = heat.saturating_add(thermal.passive_heat_delta);

        for dir in Direction::ALL {
            let Some(neighbor_pos) = space.neighbor(pos, dir) else {
                continue;
            };
            let Some((neighbor_id, neighbor)) = space.active_at(neighbor_pos) else {
                continue;
            };
            let (Some(neighbor_heat), Some(neighbor_thermal)) =
                (neighbor.heat, materials.get(neighbor.material).thermal)
            else {
                continue;
            };

            let exchanged = exchanged_heat(
                heat,
                thermal.transfer_coefficient,
                neighbor_heat,
                neighbor_thermal.transfer_coefficient,
            );
            if exchanged == 0 {
                continue;
            }
            heat = heat.saturating_add(exchanged);
            if let Some(neighbor) = space.tile_mut(neighbor_id) {
                neighbor.heat = Some(neighbor_heat.saturating_sub(exchanged));
            }
            stats.record_heat_exchange();
        }

        if let Some(tile) = space.tile_mut(id) {
            tile.heat = Some(heat);
        }

        StateChangeSystem::check_state_change(space, id, thermal.thresholds, materials, rng, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::MaterialId;
    use crate::world::{SemiRandom, Tile, WorldStats};
    use glam::IVec2;

    fn place(
        space: &mut TileSpace,
        materials: &Materials,
        material: MaterialId,
        pos: IVec2,
        heat: i32,
    ) -> TileId {
        let mut rng = SemiRandom::new(0);
        let mut tile = Tile::new(materials.get(material), pos, &mut rng);
        tile.heat = Some(heat);
        space.insert(tile).unwrap()
    }

    fn step(space: &mut TileSpace, id: TileId, materials: &Materials) {
        let mut stats = WorldStats::default();
        HeatSystem::update_tile(space, id, materials, &mut SemiRandom::new(1), &mut stats);
    }

    fn heat(space: &TileSpace, id: TileId) -> i32 {
        space.tile(id).unwrap().heat.unwrap()
    }

    #[test]
    fn test_two_tiles_meet_in_the_middle() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(2, 1);
        // Concrete: coefficient 1, no thresholds
        let hot = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(0, 0), 100);
        let cold = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(1, 0), 0);
        let mut stats = WorldStats::default();

        let mut rng = SemiRandom::new(1);
        HeatSystem::update_tile(&mut space, hot, &materials, &mut rng, &mut stats);

        assert_eq!(heat(&space, hot), 50);
        assert_eq!(heat(&space, cold), 50);
        assert_eq!(stats.heat_exchanges, 1);
    }

    #[test]
    fn test_passive_delta_applies_before_exchange() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(1, 1);
        let vapor = place(&mut space, &materials, MaterialId::VAPOR, IVec2::ZERO, 300);

        step(&mut space, vapor, &materials);
        assert_eq!(heat(&space, vapor), 299);
    }

    #[test]
    fn test_non_thermal_neighbors_are_ignored() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(2, 1);
        let concrete = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(0, 0), 100);
        let mut rng = SemiRandom::new(1);
        let goo = Tile::new(materials.get(MaterialId::GREY_GOO), IVec2::new(1, 0), &mut rng);
        space.insert(goo).unwrap();

        step(&mut space, concrete, &materials);
        assert_eq!(heat(&space, concrete), 100);
    }

    #[test]
    fn test_inactive_neighbors_are_ignored() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(2, 1);
        let hot = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(0, 0), 100);
        let cold = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(1, 0), 0);
        space.remove(cold);

        step(&mut space, hot, &materials);
        assert_eq!(heat(&space, hot), 100);
        assert_eq!(heat(&space, cold), 0);
    }

    #[test]
    fn test_exchange_follows_neighbor_order() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(3, 3);
        let center = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(1, 1), 0);
        // Below is visited first, then up
        let below = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(1, 2), 400);
        let above = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::new(1, 0), 400);

        step(&mut space, center, &materials);

        // 0 <- 400: +200, then 200 <- 400: +100
        assert_eq!(heat(&space, below), 200);
        assert_eq!(heat(&space, above), 300);
        assert_eq!(heat(&space, center), 300);
    }

    #[test]
    fn test_crossing_threshold_transforms_same_tick() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(1, 1);
        let wood = place(&mut space, &materials, MaterialId::WOOD, IVec2::ZERO, 600);
        let mut stats = WorldStats::default();

        let mut rng = SemiRandom::new(1);
        HeatSystem::update_tile(&mut space, wood, &materials, &mut rng, &mut stats);

        assert!(!space.tile(wood).unwrap().active);
        let added = space.pending_additions();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].material, MaterialId::BURNING_WOOD);
        assert_eq!(added[0].heat, Some(600));
        assert_eq!(stats.state_changes, 1);
    }

    #[test]
    fn test_extreme_heat_saturates() {
        let materials = Materials::builtin();
        let mut space = TileSpace::new(2, 1);
        // Burning wood adds +5 per tick on top of the maximum
        let hot = place(&mut space, &materials, MaterialId::BURNING_WOOD, IVec2::ZERO, i32::MAX);
        let cold = place(&mut space, &materials, MaterialId::CONCRETE, IVec2::X, i32::MIN);

        step(&mut space, hot, &materials);

        let added = space.pending_additions();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].material, MaterialId::ASH);
        assert!(added[0].heat.unwrap() > 0);
        assert!(heat(&space, cold) > i32::MIN);
    }
}
