//! State change system
//!
//! Turns a thermal tile into another material (melting, freezing, boiling,
//! condensing, igniting) or destroys it once its heat crosses a threshold.

use crate::simulation::{Materials, ThresholdCheck};
use crate::world::{SimStats, TileId, TileSpace, WorldRng};

/// System for checking and applying state changes
pub struct StateChangeSystem;

impl StateChangeSystem {
    /// Check if a tile should change state based on its current heat
    ///
    /// Returns true if the tile was transformed or removed. A successor
    /// that is itself thermal starts at the crossing heat.
    pub(crate) fn check_state_change<R: WorldRng>(
        space: &mut TileSpace,
        id: TileId,
        thresholds: ThresholdCheck,
        materials: &Materials,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        let Some((heat, material)) = space
            .tile(id)
            .filter(|tile| tile.active)
            .and_then(|tile| tile.heat.map(|heat| (heat, tile.material)))
        else {
            return false;
        };
        let Some(threshold) = thresholds.crossed(heat) else {
            return false;
        };

        let changed = match threshold.successor {
            Some(successor) => space.transform(id, materials.get(successor), rng, true),
            None => space.remove(id),
        };
        if changed {
            log::trace!(
                "{} at heat {heat} -> {}",
                materials.get(material).name,
                threshold
                    .successor
                    .map_or("nothing", |successor| materials.get(successor).name.as_str())
            );
            stats.record_state_change();
        }
        changed
    }
}
