// MODEL: world state and view geometry
pub mod world;
pub mod camera;
pub mod raycast;

pub use world::{Block, BlockPos, VoxelGrid};
pub use camera::Camera;
pub use raycast::{look_direction, MarchingRay};
