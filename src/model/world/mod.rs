pub mod block;
pub mod grid;

pub use block::Block;
pub use grid::{BlockPos, VoxelGrid};
