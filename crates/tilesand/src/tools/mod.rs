//! Brush tools for editing a world from outside the simulation

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tilesand_core::simulation::Direction;
use tilesand_core::world::World;

/// Footprint of a tool application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    /// The target cell only
    #[default]
    Single,
    /// The target cell and its 8 neighbors
    Stamp,
}

impl Brush {
    /// Cells covered when applied at `center`, center first
    ///
    /// Cells outside the grid are included; the world rejects them.
    pub fn cells(self, center: IVec2) -> Vec<IVec2> {
        match self {
            Brush::Single => vec![center],
            Brush::Stamp => std::iter::once(center)
                .chain(Direction::ALL.iter().map(|dir| center + dir.offset()))
                .collect(),
        }
    }
}

/// Trait for editing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply the tool at a grid cell; returns how many cells changed
    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize;
}

/// Clamp an arbitrary coordinate onto the grid
///
/// Returns `None` for a world with no cells.
pub fn clamp_to_grid(world: &World, x: i32, y: i32) -> Option<IVec2> {
    if world.width() <= 0 || world.height() <= 0 {
        return None;
    }
    Some(IVec2::new(
        x.clamp(0, world.width() - 1),
        y.clamp(0, world.height() - 1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_brush_is_one_cell() {
        assert_eq!(Brush::Single.cells(IVec2::new(4, 5)), vec![IVec2::new(4, 5)]);
    }

    #[test]
    fn test_stamp_covers_neighborhood() {
        let cells = Brush::Stamp.cells(IVec2::new(1, 1));
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], IVec2::new(1, 1));
        for x in 0..3 {
            for y in 0..3 {
                assert!(cells.contains(&IVec2::new(x, y)));
            }
        }
    }

    #[test]
    fn test_clamp_to_grid() {
        let world = World::new(10, 5);
        assert_eq!(clamp_to_grid(&world, -3, 2), Some(IVec2::new(0, 2)));
        assert_eq!(clamp_to_grid(&world, 40, 99), Some(IVec2::new(9, 4)));
        assert_eq!(clamp_to_grid(&world, 3, 3), Some(IVec2::new(3, 3)));
        assert_eq!(clamp_to_grid(&World::new(0, 0), 0, 0), None);
    }
}
