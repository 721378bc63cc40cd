//! Verification conditions and state checks for scenarios

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tilesand_core::simulation::MaterialId;
use tilesand_core::world::World;

/// Conditions that can be verified against world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VerificationCondition {
    /// Assert material count in region
    MaterialCount {
        material: String,
        region: Region,
        expected: usize,
        tolerance: Option<usize>, // Allow ±N variance
    },

    /// Assert material count within range
    MaterialCountRange {
        material: String,
        region: Region,
        min: usize,
        max: usize,
    },

    /// Assert material occupies a specific cell
    MaterialAt { x: i32, y: i32, expected: String },

    /// Assert no tile on a specific cell
    EmptyCell { x: i32, y: i32 },

    /// Assert total tile count in region
    TileCount { region: Region, expected: usize },
}

/// Spatial region for verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Region {
    /// Inclusive rectangle
    Rect {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },

    /// Entire grid
    Whole,
}

impl Region {
    pub fn contains(&self, pos: IVec2) -> bool {
        match *self {
            Region::Rect {
                min_x,
                min_y,
                max_x,
                max_y,
            } => pos.x >= min_x && pos.x <= max_x && pos.y >= min_y && pos.y <= max_y,
            Region::Whole => true,
        }
    }
}

/// Result of a verification check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>, // For debugging
}

impl VerificationResult {
    fn unknown_material(name: &str) -> Self {
        Self {
            passed: false,
            message: format!("Unknown material {name:?}"),
            actual_value: None,
        }
    }
}

impl VerificationCondition {
    /// Evaluate condition against world state
    pub fn evaluate(&self, world: &World) -> VerificationResult {
        match self {
            VerificationCondition::MaterialCount {
                material,
                region,
                expected,
                tolerance,
            } => {
                let Some(id) = world.materials().id(material) else {
                    return VerificationResult::unknown_material(material);
                };
                let actual = count_in_region(world, region, Some(id));
                let tol = tolerance.unwrap_or(0);
                let passed = actual >= expected.saturating_sub(tol) && actual <= expected + tol;

                VerificationResult {
                    passed,
                    message: format!(
                        "Material {} count in {:?}: expected {}±{}, got {}",
                        material, region, expected, tol, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::MaterialCountRange {
                material,
                region,
                min,
                max,
            } => {
                let Some(id) = world.materials().id(material) else {
                    return VerificationResult::unknown_material(material);
                };
                let actual = count_in_region(world, region, Some(id));
                let passed = actual >= *min && actual <= *max;

                VerificationResult {
                    passed,
                    message: format!(
                        "Material {} count in {:?}: expected {}-{}, got {}",
                        material, region, min, max, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::MaterialAt { x, y, expected } => {
                let actual = world.tile_at(*x, *y).map(|tile| material_name(world, tile.material));
                let passed = actual.as_deref() == Some(expected.as_str());

                VerificationResult {
                    passed,
                    message: format!(
                        "Material at ({}, {}): expected {}, got {:?}",
                        x, y, expected, actual
                    ),
                    actual_value: actual,
                }
            }

            VerificationCondition::EmptyCell { x, y } => {
                let actual = world.tile_at(*x, *y).map(|tile| material_name(world, tile.material));
                let passed = actual.is_none();

                VerificationResult {
                    passed,
                    message: format!("Cell ({}, {}) empty: got {:?}", x, y, actual),
                    actual_value: actual,
                }
            }

            VerificationCondition::TileCount { region, expected } => {
                let actual = count_in_region(world, region, None);
                let passed = actual == *expected;

                VerificationResult {
                    passed,
                    message: format!(
                        "Tile count in {:?}: expected {}, got {}",
                        region, expected, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }
        }
    }
}

fn material_name(world: &World, id: MaterialId) -> String {
    world.materials().get(id).name.clone()
}

/// Count tiles in a region, optionally of one material only
fn count_in_region(world: &World, region: &Region, material: Option<MaterialId>) -> usize {
    world
        .tiles()
        .filter(|(pos, tile)| {
            region.contains(*pos) && material.is_none_or(|material| tile.material == material)
        })
        .count()
}
