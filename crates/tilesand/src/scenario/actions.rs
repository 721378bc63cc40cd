//! Scenario actions applied to a world

use serde::{Deserialize, Serialize};

/// One step of a scenario
///
/// Materials are referred to by catalog name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Place one tile
    Place { material: String, x: i32, y: i32 },

    /// Place a tile on a cell and its 8 neighbors
    Stamp { material: String, x: i32, y: i32 },

    /// Place tiles over an inclusive rectangle
    FillRect {
        material: String,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },

    /// Remove the tile on one cell
    Remove { x: i32, y: i32 },

    /// Remove the tiles on a cell and its 8 neighbors
    EraseStamp { x: i32, y: i32 },

    /// Overwrite the heat of a thermal tile
    SetHeat { x: i32, y: i32, heat: i32 },

    /// Advance the simulation
    RunTicks { ticks: u64 },

    /// Write a message to the execution log
    Log { message: String },
}
