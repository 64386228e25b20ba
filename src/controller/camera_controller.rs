use crate::model::Camera;

use super::input::{InputState, MoveKey};

/// Handles camera movement and orientation
pub struct CameraController {
    /// World units moved per frame per held key.
    pub move_speed: f32,
    /// Degrees per pointer unit.
    pub mouse_sensitivity: f32,
    awaiting_reference: bool,
}

impl CameraController {
    pub fn new(move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            move_speed,
            mouse_sensitivity,
            awaiting_reference: true,
        }
    }

    /// Re-arm the reference sample; call when the pointer is (re)captured.
    pub fn reset_pointer(&mut self) {
        self.awaiting_reference = true;
    }

    /// Apply a pointer delta. The first delta after capture is swallowed.
    pub fn on_pointer_delta(&mut self, camera: &mut Camera, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if self.awaiting_reference {
            self.awaiting_reference = false;
            return;
        }
        self.apply_look(camera, dx, dy);
    }

    /// Apply mouse look delta to camera
    pub fn apply_look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        camera.yaw += dx * self.mouse_sensitivity;
        camera.set_pitch(camera.pitch - dy * self.mouse_sensitivity);
    }

    /// Advance the camera one frame for every held movement key.
    pub fn update_movement(&self, camera: &mut Camera, input: &InputState) {
        let speed = self.move_speed;
        let (sin, cos) = camera.yaw.to_radians().sin_cos();

        if input.is_held(MoveKey::Forward) {
            camera.eye.x += sin * speed;
            camera.eye.z -= cos * speed;
        }
        if input.is_held(MoveKey::Backward) {
            camera.eye.x -= sin * speed;
            camera.eye.z += cos * speed;
        }
        if input.is_held(MoveKey::Left) {
            camera.eye.x -= cos * speed;
            camera.eye.z -= sin * speed;
        }
        if input.is_held(MoveKey::Right) {
            camera.eye.x += cos * speed;
            camera.eye.z += sin * speed;
        }
        if input.is_held(MoveKey::Up) {
            camera.eye.y += speed;
        }
        if input.is_held(MoveKey::Down) {
            camera.eye.y -= speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn controller() -> CameraController {
        CameraController::new(0.05, 0.1)
    }

    #[test]
    fn test_first_delta_is_reference_sample() {
        let mut ctrl = controller();
        let mut camera = Camera::new(800, 600);

        ctrl.on_pointer_delta(&mut camera, 500.0, 500.0);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);

        ctrl.on_pointer_delta(&mut camera, 10.0, -20.0);
        assert_abs_diff_eq!(camera.yaw, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.pitch, 2.0, epsilon = 1e-6);

        // Recapture discards again
        ctrl.reset_pointer();
        ctrl.on_pointer_delta(&mut camera, 10.0, 0.0);
        assert_abs_diff_eq!(camera.yaw, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let ctrl = controller();
        let mut camera = Camera::new(800, 600);
        let deltas = [
            (0.0, -5000.0),
            (3.0, 12.5),
            (0.0, 1.0e6),
            (-7.0, -0.3),
            (0.0, -891.0),
            (1.0, 889.9),
            (0.0, f32::MAX),
        ];
        for (dx, dy) in deltas {
            ctrl.apply_look(&mut camera, dx, dy);
            assert!((-89.0..=89.0).contains(&camera.pitch), "pitch {} out of range", camera.pitch);
        }
    }

    #[test]
    fn test_non_finite_deltas_ignored() {
        let mut ctrl = controller();
        let mut camera = Camera::new(800, 600);

        // A NaN sample does not count as the reference sample either
        ctrl.on_pointer_delta(&mut camera, f32::NAN, 0.0);
        ctrl.on_pointer_delta(&mut camera, 0.0, 0.0);
        ctrl.on_pointer_delta(&mut camera, 0.0, f32::NAN);
        ctrl.on_pointer_delta(&mut camera, f32::INFINITY, f32::NEG_INFINITY);
        ctrl.apply_look(&mut camera, 0.0, f32::NAN);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);

        ctrl.on_pointer_delta(&mut camera, 0.0, -20.0);
        assert_abs_diff_eq!(camera.pitch, 2.0, epsilon = 1e-6);
        assert!((-89.0..=89.0).contains(&camera.pitch));
    }

    #[test]
    fn test_forward_movement_from_zero_yaw() {
        let ctrl = controller();
        let mut camera = Camera::new(800, 600);
        camera.eye = glam::Vec3::ZERO;
        let mut input = InputState::new();
        input.press(MoveKey::Forward);

        let frames = 40;
        for _ in 0..frames {
            ctrl.update_movement(&mut camera, &input);
        }
        assert_abs_diff_eq!(camera.eye.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.eye.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.eye.z, -(frames as f32) * 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_strafe_and_vertical() {
        let ctrl = controller();
        let mut camera = Camera::new(800, 600);
        camera.eye = glam::Vec3::ZERO;
        let mut input = InputState::new();
        input.press(MoveKey::Right);
        input.press(MoveKey::Up);

        ctrl.update_movement(&mut camera, &input);
        assert_abs_diff_eq!(camera.eye.x, 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.eye.y, 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.eye.z, 0.0, epsilon = 1e-6);

        // Turned 90 degrees, strafing left moves along -z
        camera.eye = glam::Vec3::ZERO;
        camera.yaw = 90.0;
        let mut input = InputState::new();
        input.press(MoveKey::Left);
        ctrl.update_movement(&mut camera, &input);
        assert_abs_diff_eq!(camera.eye.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.eye.z, -0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let ctrl = controller();
        let mut camera = Camera::new(800, 600);
        let start = camera.eye;
        let mut input = InputState::new();
        input.press(MoveKey::Forward);
        input.press(MoveKey::Backward);
        input.press(MoveKey::Up);
        input.press(MoveKey::Down);

        ctrl.update_movement(&mut camera, &input);
        assert_abs_diff_eq!(camera.eye.x, start.x, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.eye.y, start.y, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.eye.z, start.z, epsilon = 1e-6);
    }
}
