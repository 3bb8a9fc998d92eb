use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Direction of keyboard-driven camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Fly camera with Euler angles in degrees.
///
/// `front`, `right` and `up` are derived from yaw and pitch; call
/// [`FlyCamera::set_front`] rather than writing `front` directly so the
/// angles stay in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyCamera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    zoom: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Point the camera along `front`, re-deriving yaw and pitch.
    ///
    /// A zero vector leaves the camera unchanged.
    pub fn set_front(&mut self, front: Vec3) {
        let Some(dir) = front.try_normalize() else {
            return;
        };
        self.pitch = dir.y.asin().to_degrees().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.update_vectors();
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse offset. Positive `y_offset` looks up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View matrix with the translation stripped, for the skybox.
    pub fn rotation_only_view(&self) -> Mat4 {
        Mat4::from_mat3(glam::Mat3::from_mat4(self.view_matrix()))
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = FlyCamera::new(Vec3::new(0.0, 0.0, 3.0));
        assert!(close(cam.front(), Vec3::NEG_Z));
        assert!(close(cam.right(), Vec3::X));
        assert!(close(cam.up(), Vec3::Y));
        assert_eq!(cam.zoom(), 45.0);
        let vp = cam.projection_matrix(4.0 / 3.0) * cam.view_matrix();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn keyboard_moves_along_front_and_right() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(close(cam.position, Vec3::new(0.0, 0.0, -2.5)));
        cam.process_keyboard(CameraMovement::Right, 2.0);
        assert!(close(cam.position, Vec3::new(5.0, 0.0, -2.5)));
        cam.process_keyboard(CameraMovement::Backward, 1.0);
        cam.process_keyboard(CameraMovement::Left, 2.0);
        assert!(close(cam.position, Vec3::ZERO));
    }

    #[test]
    fn pitch_is_constrained() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 10_000.0, true);
        assert_eq!(cam.pitch(), 89.0);
        cam.process_mouse_movement(0.0, -20_000.0, true);
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn unconstrained_pitch_is_left_alone() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(0.0, 1_000.0, false);
        assert_eq!(cam.pitch(), 100.0);
    }

    #[test]
    fn mouse_sensitivity_scales_yaw() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_movement(100.0, 0.0, true);
        assert!((cam.yaw() - (-80.0)).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom(), 1.0);
        cam.process_mouse_scroll(-100.0);
        assert_eq!(cam.zoom(), 45.0);
    }

    #[test]
    fn set_front_survives_mouse_update() {
        let mut cam = FlyCamera::default();
        let target = Vec3::new(1.0, -0.5, -1.0).normalize();
        cam.set_front(target);
        assert!(close(cam.front(), target));
        cam.process_mouse_movement(0.0, 0.0, true);
        assert!(close(cam.front(), target));
    }

    #[test]
    fn set_front_ignores_zero() {
        let mut cam = FlyCamera::default();
        cam.set_front(Vec3::ZERO);
        assert!(close(cam.front(), Vec3::NEG_Z));
    }

    #[test]
    fn skybox_view_has_no_translation() {
        let cam = FlyCamera::new(Vec3::new(5.0, 6.0, 7.0));
        let view = cam.rotation_only_view();
        assert_eq!(view.w_axis, glam::Vec4::W);
    }
}
