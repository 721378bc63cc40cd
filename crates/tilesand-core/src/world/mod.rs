//! World state - grid, tile arena, random source and the per-tick systems

mod behavior_system;
mod grid;
mod heat_system;
mod movement_system;
mod rng;
pub mod stats;
mod tile;
mod tile_space;
#[allow(clippy::module_inception)]
mod world;

pub use behavior_system::CustomBehaviorSystem;
pub use grid::SpatialGrid;
pub use heat_system::HeatSystem;
pub use movement_system::{MAX_UPDATE_SKIP, MovementSystem};
pub use rng::{DEFAULT_SEED, SemiRandom, TABLE_SIZE, WorldRng};
pub use stats::{NoopStats, SimStats, WorldStats};
pub use tile::{TileId, TileView};
pub use world::World;

pub(crate) use tile::Tile;
pub(crate) use tile_space::TileSpace;
