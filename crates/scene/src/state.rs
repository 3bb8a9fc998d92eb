use glam::Vec3;
use serde::{Deserialize, Serialize};
use tabletop_common::Transform;

use crate::camera::FlyCamera;
use crate::lights::{PointLight, SpotLight};

/// Everything the demo remembers between frames.
///
/// Only part of this record is persisted; see `tabletop-persist` for the
/// on-disk field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramState {
    /// Background colour behind all geometry.
    pub clear_color: Vec3,
    /// Whether the debug overlay is shown.
    pub overlay_enabled: bool,
    pub spotlight_enabled: bool,
    pub camera: FlyCamera,
    /// Mouse motion turns the camera only while this is set.
    pub camera_mouse_look: bool,
    pub cup_position: Vec3,
    pub cup_scale: f32,
    pub point_light: PointLight,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            clear_color: Vec3::ZERO,
            overlay_enabled: false,
            spotlight_enabled: false,
            camera: FlyCamera::new(Vec3::new(0.0, 0.0, 3.0)),
            camera_mouse_look: true,
            cup_position: Vec3::new(0.0, 0.0, -4.0),
            cup_scale: 0.5,
            point_light: PointLight::default(),
        }
    }
}

impl ProgramState {
    pub const CUP_SCALE_MIN: f32 = 0.1;
    pub const CUP_SCALE_MAX: f32 = 4.0;

    /// Show or hide the overlay. Showing it frees the mouse for the UI;
    /// hiding it hands the mouse back to the camera.
    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay_enabled = !self.overlay_enabled;
        self.camera_mouse_look = !self.overlay_enabled;
        self.overlay_enabled
    }

    pub fn toggle_spotlight(&mut self) -> bool {
        self.spotlight_enabled = !self.spotlight_enabled;
        self.spotlight_enabled
    }

    /// Whether raw mouse motion should currently turn the camera.
    pub fn mouse_look_active(&self) -> bool {
        self.camera_mouse_look
    }

    pub fn set_cup_scale(&mut self, scale: f32) {
        self.cup_scale = scale.clamp(Self::CUP_SCALE_MIN, Self::CUP_SCALE_MAX);
    }

    pub fn cup_transform(&self) -> Transform {
        Transform::from_position(self.cup_position).with_uniform_scale(self.cup_scale)
    }

    pub fn spot_light(&self) -> SpotLight {
        SpotLight::from_camera(&self.camera, self.spotlight_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = ProgramState::default();
        assert_eq!(state.clear_color, Vec3::ZERO);
        assert!(!state.overlay_enabled);
        assert!(!state.spotlight_enabled);
        assert!(state.camera_mouse_look);
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(state.cup_position, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(state.cup_scale, 0.5);
    }

    #[test]
    fn overlay_toggle_hands_mouse_back() {
        let mut state = ProgramState::default();
        assert!(state.toggle_overlay());
        assert!(!state.mouse_look_active());
        assert!(!state.toggle_overlay());
        assert!(state.mouse_look_active());
    }

    #[test]
    fn spotlight_follows_flag() {
        let mut state = ProgramState::default();
        assert_eq!(state.spot_light().diffuse, Vec3::ZERO);
        state.toggle_spotlight();
        assert_eq!(state.spot_light().diffuse, Vec3::ONE);
    }

    #[test]
    fn cup_scale_is_clamped() {
        let mut state = ProgramState::default();
        state.set_cup_scale(100.0);
        assert_eq!(state.cup_scale, ProgramState::CUP_SCALE_MAX);
        state.set_cup_scale(0.0);
        assert_eq!(state.cup_scale, ProgramState::CUP_SCALE_MIN);
    }
}
