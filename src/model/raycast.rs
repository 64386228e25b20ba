use glam::Vec3;

use super::world::{BlockPos, VoxelGrid};

/// Distance advanced per marching step.
pub const STEP_SIZE: f32 = 0.1;
/// Number of steps taken, giving a reach of one world unit.
pub const MAX_STEPS: usize = 10;

/// Edit direction for a yaw/pitch pair in degrees.
///
/// The horizontal part ignores pitch, so the vector is not normalised once the
/// camera tilts. Block edits depend on exactly this shape.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let yaw = yaw.to_radians();
    let pitch = pitch.to_radians();
    Vec3::new(yaw.sin(), -pitch.sin(), -yaw.cos())
}

/// Fixed-step ray march yielding the nearest cell after each step.
///
/// Not a grid traversal: cells can be skipped or visited twice, and there is
/// no face information.
#[derive(Debug, Clone)]
pub struct MarchingRay {
    pos: Vec3,
    step: Vec3,
    remaining: usize,
}

impl MarchingRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_steps(origin, direction, STEP_SIZE, MAX_STEPS)
    }

    fn with_steps(origin: Vec3, direction: Vec3, step_size: f32, steps: usize) -> Self {
        Self {
            pos: origin,
            step: direction * step_size,
            remaining: steps,
        }
    }

    /// First occupied cell along the ray.
    pub fn first_occupied(mut self, grid: &VoxelGrid) -> Option<BlockPos> {
        self.find(|pos| grid.contains(pos))
    }

    /// First empty cell along the ray.
    pub fn first_empty(mut self, grid: &VoxelGrid) -> Option<BlockPos> {
        self.find(|pos| !grid.contains(pos))
    }
}

impl Iterator for MarchingRay {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.pos += self.step;
        Some(BlockPos::from_rounded(self.pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MarchingRay {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_look_direction() {
        let d = look_direction(0.0, 0.0);
        assert_abs_diff_eq!(d.x, 0.0);
        assert_abs_diff_eq!(d.y, 0.0);
        assert_abs_diff_eq!(d.z, -1.0);

        let d = look_direction(90.0, 0.0);
        assert_abs_diff_eq!(d.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d.z, 0.0, epsilon = 1e-6);

        // Looking down keeps the full horizontal component
        let d = look_direction(0.0, 89.0);
        assert!(d.y < -0.99);
        assert_abs_diff_eq!(d.z, -1.0);
    }

    #[test]
    fn test_ray_takes_ten_steps() {
        let ray = MarchingRay::new(Vec3::ZERO, look_direction(0.0, 0.0));
        assert_eq!(ray.len(), MAX_STEPS);
        let cells: Vec<_> = ray.collect();
        assert_eq!(cells.len(), 10);
        // One unit of reach: never beyond the neighbouring cell
        assert!(cells.iter().all(|c| c.2 == 0 || c.2 == -1));
        assert_eq!(cells.first(), Some(&BlockPos(0, 0, 0)));
        assert_eq!(cells.last(), Some(&BlockPos(0, 0, -1)));
    }

    #[test]
    fn test_first_occupied_and_empty() {
        let mut grid = VoxelGrid::new();
        grid.place(BlockPos(0, 0, -1), Block::Textured);

        let origin = Vec3::new(0.0, 0.0, 0.0);
        let dir = look_direction(0.0, 0.0);
        assert_eq!(MarchingRay::new(origin, dir).first_occupied(&grid), Some(BlockPos(0, 0, -1)));
        assert_eq!(MarchingRay::new(origin, dir).first_empty(&grid), Some(BlockPos(0, 0, 0)));

        // Out of reach
        let far = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!(MarchingRay::new(far, dir).first_occupied(&grid), None);
    }
}
