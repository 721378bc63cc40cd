//! Eraser tool

use super::{Brush, Tool};
use tilesand_core::world::World;

/// Eraser tool that queues occupants for removal at the next commit
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush: Brush) -> usize {
        brush
            .cells(glam::IVec2::new(x, y))
            .into_iter()
            .filter(|cell| world.remove(cell.x, cell.y))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::PenTool;
    use tilesand_core::simulation::MaterialId;

    #[test]
    fn test_erase_takes_effect_at_commit() {
        let mut world = World::new(5, 5);
        PenTool::new(MaterialId::CONCRETE).apply(&mut world, 2, 2, Brush::Stamp);

        assert_eq!(EraseTool.apply(&mut world, 2, 2, Brush::Single), 1);
        assert!(world.tile_at(2, 2).is_none());

        world.tick();
        assert_eq!(world.tile_count(), 8);
        assert_eq!(EraseTool.apply(&mut world, 2, 2, Brush::Stamp), 8);
        world.tick();
        assert_eq!(world.tile_count(), 0);
    }
}
