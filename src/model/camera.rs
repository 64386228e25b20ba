use glam::{Mat4, Vec3};

use super::raycast::look_direction;

/// Pitch limit in degrees, short of straight up/down to avoid flipping over.
pub const PITCH_LIMIT: f32 = 89.0;

/// First-person camera. Yaw and pitch are in degrees; positive pitch looks down.
pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 70.0,
            aspect: width as f32 / height.max(1) as f32,
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    /// Direction used for block edits; see [`look_direction`].
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Pitch about X, then yaw about Y, then move the world opposite the eye.
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_translation(-self.eye)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_initial_state() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 3.0));
        assert_abs_diff_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_default_view_looks_down_negative_z() {
        let camera = Camera::new(800, 600);
        // A point straight ahead ends up on the view axis in front of the eye
        let ahead = camera.view().transform_point3(camera.eye + Vec3::new(0.0, 0.0, -2.0));
        assert_abs_diff_eq!(ahead.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ahead.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ahead.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_matches_edit_direction_when_turned() {
        let mut camera = Camera::new(800, 600);
        camera.yaw = 90.0;
        let ahead = camera.eye + camera.forward();
        let in_view = camera.view().transform_point3(ahead);
        assert_abs_diff_eq!(in_view.x, 0.0, epsilon = 1e-5);
        assert!(in_view.z < 0.0);
    }

    #[test]
    fn test_set_pitch_clamps() {
        let mut camera = Camera::new(800, 600);
        camera.set_pitch(120.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.set_pitch(-400.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_zero_height_keeps_aspect() {
        let mut camera = Camera::new(800, 600);
        camera.set_aspect(1024, 0);
        assert_abs_diff_eq!(camera.aspect, 800.0 / 600.0);
    }
}
