//! Simulation rules - heat exchange and heat-driven state changes

pub mod heat;
pub mod state_changes;

// Re-export from tilesand-simulation so callers need a single dependency
pub use tilesand_simulation::{
    Behavior, BehaviorDecl, ColorSpec, Direction, MaterialCatalog, MaterialDecl, MaterialDef,
    MaterialId, Materials, Movement, RegistryError, ThermalDecl, ThermalDef, Threshold,
    ThresholdCheck, ThresholdDecl,
};

pub use heat::exchanged_heat;
pub use state_changes::StateChangeSystem;
