use std::collections::HashMap;

use glam::Vec3;

use super::Block;

/// Coordinates of a block cell in world space
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct BlockPos(pub i32, pub i32, pub i32);

impl BlockPos {
    /// Nearest cell to a continuous position.
    ///
    /// Halves round toward +inf, so -0.5 lands in cell 0 and 0.5 in cell 1.
    pub fn from_rounded(p: Vec3) -> Self {
        BlockPos(round_half_up(p.x), round_half_up(p.y), round_half_up(p.z))
    }

    /// Centre of the cell; unit cubes are drawn centred on their coordinate.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.0 as f32, self.1 as f32, self.2 as f32)
    }
}

fn round_half_up(v: f32) -> i32 {
    // `(v + 0.5).floor()` rounds 0.49999997 up because the sum is inexact.
    let floor = v.floor();
    if v - floor >= 0.5 {
        floor as i32 + 1
    } else {
        floor as i32
    }
}

/// Sparse voxel grid: only occupied cells are stored.
#[derive(Debug, Default, Clone)]
pub struct VoxelGrid {
    blocks: HashMap<BlockPos, Block>,
    revision: u64,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid holding only the flat startup platform.
    pub fn with_platform(radius: i32, y: i32, block: Block) -> Self {
        let mut grid = Self::new();
        grid.generate_platform(radius, y, block);
        grid
    }

    /// Fill the square `[-radius, radius]` on both x and z at height `y`.
    pub fn generate_platform(&mut self, radius: i32, y: i32, block: Block) {
        for x in -radius..=radius {
            for z in -radius..=radius {
                self.place(BlockPos(x, y, z), block);
            }
        }
    }

    /// Insert or overwrite the cell at `pos`.
    pub fn place(&mut self, pos: BlockPos, block: Block) {
        self.blocks.insert(pos, block);
        self.revision += 1;
    }

    /// Clear the cell at `pos`. Removing air is a no-op.
    pub fn remove(&mut self, pos: &BlockPos) -> Option<Block> {
        let removed = self.blocks.remove(pos);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    pub fn contains(&self, pos: &BlockPos) -> bool {
        self.blocks.contains_key(pos)
    }

    pub fn get(&self, pos: &BlockPos) -> Option<Block> {
        self.blocks.get(pos).copied()
    }

    /// All occupied cells, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, Block)> + '_ {
        self.blocks.iter().map(|(pos, block)| (*pos, *block))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Bumped on every mutation so the renderer can skip unchanged frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_remove_round_trip() {
        let mut grid = VoxelGrid::new();
        let pos = BlockPos(3, -7, 12);

        assert!(!grid.contains(&pos));
        grid.place(pos, Block::Textured);
        assert!(grid.contains(&pos));
        assert_eq!(grid.get(&pos), Some(Block::Textured));

        assert_eq!(grid.remove(&pos), Some(Block::Textured));
        assert!(!grid.contains(&pos));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_overwrite_and_absent_remove() {
        let mut grid = VoxelGrid::new();
        let pos = BlockPos(0, 0, 0);

        grid.place(pos, Block::Textured);
        grid.place(pos, Block::Textured);
        assert_eq!(grid.len(), 1);

        assert_eq!(grid.remove(&BlockPos(1, 1, 1)), None);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut grid = VoxelGrid::new();
        let start = grid.revision();

        grid.place(BlockPos(0, 0, 0), Block::Textured);
        let after_place = grid.revision();
        assert!(after_place > start);

        // Removing air changes nothing
        grid.remove(&BlockPos(5, 5, 5));
        assert_eq!(grid.revision(), after_place);

        grid.remove(&BlockPos(0, 0, 0));
        assert!(grid.revision() > after_place);
    }

    #[test]
    fn test_startup_platform() {
        let grid = VoxelGrid::with_platform(5, -1, Block::Textured);
        assert_eq!(grid.len(), 121);

        for x in -5..=5 {
            for z in -5..=5 {
                assert!(grid.contains(&BlockPos(x, -1, z)), "missing ({x}, -1, {z})");
                assert!(!grid.contains(&BlockPos(x, 0, z)));
                assert!(!grid.contains(&BlockPos(x, -2, z)));
            }
        }
        assert!(grid.iter().all(|(pos, _)| pos.1 == -1));
        assert!(!grid.contains(&BlockPos(6, -1, 0)));
    }

    #[test]
    fn test_iter_is_restartable() {
        let grid = VoxelGrid::with_platform(1, 0, Block::Textured);
        assert_eq!(grid.iter().count(), 9);
        assert_eq!(grid.iter().count(), 9);
    }

    #[test]
    fn test_from_rounded() {
        assert_eq!(BlockPos::from_rounded(Vec3::new(0.4, -0.4, 1.6)), BlockPos(0, 0, 2));
        assert_eq!(BlockPos::from_rounded(Vec3::new(0.5, -0.5, -0.6)), BlockPos(1, 0, -1));
        assert_eq!(BlockPos::from_rounded(Vec3::new(-1.5, 2.49, -2.51)), BlockPos(-1, 2, -3));
    }

    #[test]
    fn test_from_rounded_just_below_half() {
        let below_half = 0.49999997_f32;
        assert_eq!(BlockPos::from_rounded(Vec3::new(below_half, 0.0, 0.0)), BlockPos(0, 0, 0));
        assert_eq!(BlockPos::from_rounded(Vec3::new(-below_half, 0.0, 0.0)), BlockPos(0, 0, 0));
    }
}
