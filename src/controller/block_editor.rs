use glam::Vec3;
use tracing::debug;

use crate::model::{Block, BlockPos, MarchingRay, VoxelGrid};

use super::input::MouseButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Place,
    Destroy,
}

impl EditAction {
    /// Left click destroys, right click places.
    pub fn from_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(EditAction::Destroy),
            MouseButton::Right => Some(EditAction::Place),
            MouseButton::Middle => None,
        }
    }
}

/// Resolves place/destroy clicks against the grid along the view ray.
pub struct BlockEditor {
    pub block: Block,
}

impl BlockEditor {
    pub fn new(block: Block) -> Self {
        Self { block }
    }

    /// Apply `action` at the first matching cell within reach.
    ///
    /// Returns the edited cell, or `None` when nothing along the ray matched.
    pub fn apply(
        &self,
        grid: &mut VoxelGrid,
        origin: Vec3,
        direction: Vec3,
        action: EditAction,
    ) -> Option<BlockPos> {
        let ray = MarchingRay::new(origin, direction);
        match action {
            EditAction::Destroy => {
                let pos = ray.first_occupied(grid)?;
                grid.remove(&pos);
                debug!(?pos, "destroyed block");
                Some(pos)
            }
            EditAction::Place => {
                let pos = ray.first_empty(grid)?;
                grid.place(pos, self.block);
                debug!(?pos, "placed block");
                Some(pos)
            }
        }
    }

    /// Cell a destroy would remove right now.
    pub fn target(grid: &VoxelGrid, origin: Vec3, direction: Vec3) -> Option<BlockPos> {
        MarchingRay::new(origin, direction).first_occupied(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::look_direction;

    fn platform() -> VoxelGrid {
        VoxelGrid::with_platform(5, -1, Block::Textured)
    }

    #[test]
    fn test_destroy_looking_down_removes_one_cell() {
        let mut grid = platform();
        let editor = BlockEditor::new(Block::Textured);
        let origin = Vec3::new(0.0, 0.0, 0.5);
        let dir = look_direction(0.0, 89.0);

        let removed = editor.apply(&mut grid, origin, dir, EditAction::Destroy);
        assert_eq!(removed, Some(BlockPos(0, -1, 0)));
        assert!(!grid.contains(&BlockPos(0, -1, 0)));
        assert_eq!(grid.len(), 120);
    }

    #[test]
    fn test_destroy_out_of_reach_is_noop() {
        let mut grid = platform();
        let editor = BlockEditor::new(Block::Textured);
        let origin = Vec3::new(0.0, 5.0, 0.0);
        let revision = grid.revision();

        let removed = editor.apply(&mut grid, origin, look_direction(0.0, 89.0), EditAction::Destroy);
        assert_eq!(removed, None);
        assert_eq!(grid.len(), 121);
        assert_eq!(grid.revision(), revision);
    }

    #[test]
    fn test_place_on_empty_grid() {
        let mut grid = VoxelGrid::new();
        let editor = BlockEditor::new(Block::Textured);
        let dir = look_direction(0.0, 0.0);

        // First rounded cell along -z is the origin cell itself
        let placed = editor.apply(&mut grid, Vec3::ZERO, dir, EditAction::Place);
        assert_eq!(placed, Some(BlockPos(0, 0, 0)));
        assert_eq!(grid.len(), 1);

        // Next click lands on the following free cell
        let placed = editor.apply(&mut grid, Vec3::ZERO, dir, EditAction::Place);
        assert_eq!(placed, Some(BlockPos(0, 0, -1)));
        assert_eq!(grid.len(), 2);

        // Both reachable cells are full now
        let placed = editor.apply(&mut grid, Vec3::ZERO, dir, EditAction::Place);
        assert_eq!(placed, None);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_target_matches_destroy() {
        let grid = platform();
        let origin = Vec3::new(2.0, 0.0, 2.5);
        let dir = look_direction(0.0, 89.0);
        assert_eq!(BlockEditor::target(&grid, origin, dir), Some(BlockPos(2, -1, 2)));
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(EditAction::from_button(MouseButton::Left), Some(EditAction::Destroy));
        assert_eq!(EditAction::from_button(MouseButton::Right), Some(EditAction::Place));
        assert_eq!(EditAction::from_button(MouseButton::Middle), None);
    }
}
