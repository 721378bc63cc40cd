//! Material simulation data for tilesand
//!
//! This crate provides the foundational data types for the tile simulation:
//! - Neighbor directions and movement candidate orderings (Direction)
//! - Material declarations and the two-phase registry (MaterialCatalog, Materials)
//! - The built-in material catalog
//! - Registry errors (RegistryError)

mod catalog;
mod directions;
mod error;
mod materials;

pub use directions::{
    Direction, GAS_ORDERINGS, IGNITER_PATTERNS, LIQUID_ORDERINGS, POWDER_ORDERINGS,
};
pub use error::RegistryError;
pub use materials::{
    Behavior, BehaviorDecl, ColorSpec, MaterialCatalog, MaterialDecl, MaterialDef, MaterialId,
    Materials, Movement, ThermalDecl, ThermalDef, Threshold, ThresholdCheck, ThresholdDecl,
};
