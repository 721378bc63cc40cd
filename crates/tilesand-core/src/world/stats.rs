//! Simulation statistics collection

use serde::{Deserialize, Serialize};

/// Trait for collecting simulation statistics
///
/// Systems record into `&mut dyn SimStats` so they can be driven without a
/// world in tests.
pub trait SimStats {
    /// A tile changed cell (move, swap or igniter step)
    fn record_tile_moved(&mut self);

    /// Two thermal tiles exchanged a nonzero amount of heat
    fn record_heat_exchange(&mut self);

    /// A threshold transformed or destroyed a tile
    fn record_state_change(&mut self);

    /// A custom behavior altered the world
    fn record_reaction(&mut self);

    /// A queued addition landed on an occupied cell and was dropped
    fn record_discarded(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_tile_moved(&mut self) {}
    fn record_heat_exchange(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
    fn record_discarded(&mut self) {}
}

/// Running totals kept by the world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    pub tiles_moved: u64,
    pub heat_exchanges: u64,
    pub state_changes: u64,
    pub reactions: u64,
    pub discarded_additions: u64,
}

impl WorldStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for WorldStats {
    fn record_tile_moved(&mut self) {
        self.tiles_moved += 1;
    }

    fn record_heat_exchange(&mut self) {
        self.heat_exchanges += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_discarded(&mut self) {
        self.discarded_additions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_all_methods() {
        let mut stats = NoopStats;
        for _ in 0..100 {
            stats.record_tile_moved();
            stats.record_heat_exchange();
            stats.record_state_change();
            stats.record_reaction();
            stats.record_discarded();
        }
    }

    #[test]
    fn test_world_stats_counts() {
        let mut stats = WorldStats::default();
        stats.record_tile_moved();
        stats.record_tile_moved();
        stats.record_heat_exchange();
        stats.record_state_change();
        stats.record_reaction();
        stats.record_reaction();
        stats.record_reaction();
        stats.record_discarded();

        assert_eq!(
            stats,
            WorldStats {
                tiles_moved: 2,
                heat_exchanges: 1,
                state_changes: 1,
                reactions: 3,
                discarded_additions: 1,
            }
        );

        stats.reset();
        assert_eq!(stats, WorldStats::default());
    }

    #[test]
    fn test_world_stats_through_trait_object() {
        let mut stats = WorldStats::default();
        {
            let dyn_stats: &mut dyn SimStats = &mut stats;
            dyn_stats.record_state_change();
        }
        assert_eq!(stats.state_changes, 1);
    }
}
