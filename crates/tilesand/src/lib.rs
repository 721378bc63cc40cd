//! # tilesand - headless driver for the tile simulation
//!
//! Configuration loading, brush tools and RON scenarios on top of
//! [`tilesand_core`].

pub mod config;
pub mod scenario;
pub mod tools;

// Re-export core modules for convenience
pub use tilesand_core::simulation;
pub use tilesand_core::world;

pub use config::SimConfig;

/// Common imports for internal use
pub mod prelude {
    pub use glam::IVec2;
    pub use tilesand_core::simulation::{MaterialId, Materials};
    pub use tilesand_core::world::{TileView, World};
}
