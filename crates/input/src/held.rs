use glam::Vec2;
use std::collections::BTreeSet;
use tabletop_scene::{CameraMovement, FlyCamera};

use crate::action::{Key, movement_for_key};

/// Keyboard movement runs this many times faster than the camera's
/// nominal speed.
pub const KEYBOARD_SPEED_SCALE: f32 = 5.0;

/// Movement keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct HeldMovement {
    held: BTreeSet<CameraMovement>,
}

impl HeldMovement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a key transition. Keys without a movement binding are ignored.
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        let Some(movement) = movement_for_key(key) else {
            return;
        };
        if pressed {
            self.held.insert(movement);
        } else {
            self.held.remove(&movement);
        }
    }

    pub fn is_held(&self, movement: CameraMovement) -> bool {
        self.held.contains(&movement)
    }

    pub fn iter(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        self.held.iter().copied()
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Move `camera` for every held key over `dt` seconds.
    pub fn apply(&self, camera: &mut FlyCamera, dt: f32) {
        for movement in self.iter() {
            camera.process_keyboard(movement, dt * KEYBOARD_SPEED_SCALE);
        }
    }
}

/// Convert raw mouse motion (y grows downwards) into look offsets
/// (y grows upwards).
pub fn look_offsets(dx: f64, dy: f64) -> Vec2 {
    Vec2::new(dx as f32, -(dy as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn press_and_release() {
        let mut held = HeldMovement::new();
        held.set_key(Key::W, true);
        held.set_key(Key::D, true);
        held.set_key(Key::F, true);
        assert!(held.is_held(CameraMovement::Forward));
        assert!(held.is_held(CameraMovement::Right));
        assert_eq!(held.iter().count(), 2);

        held.set_key(Key::W, false);
        assert!(!held.is_held(CameraMovement::Forward));
        held.clear();
        assert_eq!(held.iter().count(), 0);
    }

    #[test]
    fn apply_scales_by_five() {
        let mut held = HeldMovement::new();
        held.set_key(Key::W, true);
        let mut camera = FlyCamera::new(Vec3::ZERO);
        held.apply(&mut camera, 0.1);
        // speed 2.5 * 5 * 0.1 along -Z
        assert!((camera.position - Vec3::new(0.0, 0.0, -1.25)).length() < 1e-5);
    }

    #[test]
    fn look_offsets_invert_y() {
        assert_eq!(look_offsets(3.0, 4.0), Vec2::new(3.0, -4.0));
    }
}
