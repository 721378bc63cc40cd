//! Pen tool for placing materials

use super::{Brush, Tool};
use tilesand_core::simulation::MaterialId;
use tilesand_core::world::World;

/// Pen tool that places a specific material on empty cells
pub struct PenTool {
    material: MaterialId,
}

impl PenTool {
    /// Create a new pen tool for the given material
    pub fn new(material: MaterialId) -> Self {
        Self { material }
    }

    /// Set the material this pen places
    pub fn set_material(&mut self, material: MaterialId) {
        self.material = material;
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize {
        brush
            .cells(glam::IVec2::new(x, y))
            .into_iter()
            .filter(|cell| world.place(self.material, cell.x, cell.y))
            .count()
    }
}
