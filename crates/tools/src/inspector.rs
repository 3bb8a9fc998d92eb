use glam::Vec3;
use tabletop_scene::FlyCamera;

/// Snapshot of the camera for the "Camera info" overlay window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub position: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    pub front: Vec3,
    /// Field of view in degrees.
    pub zoom: f32,
}

impl CameraInfo {
    pub fn from_camera(camera: &FlyCamera) -> Self {
        Self {
            position: camera.position,
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            front: camera.front(),
            zoom: camera.zoom(),
        }
    }

    pub fn position_line(&self) -> String {
        format!(
            "Position: ({:.2}, {:.2}, {:.2})",
            self.position.x, self.position.y, self.position.z
        )
    }

    pub fn angles_line(&self) -> String {
        format!("(Yaw, Pitch): ({:.2}, {:.2})", self.yaw, self.pitch)
    }

    pub fn front_line(&self) -> String {
        format!(
            "Front: ({:.2}, {:.2}, {:.2})",
            self.front.x, self.front.y, self.front.z
        )
    }
}

impl std::fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Camera: {} {} {} fov={:.1}",
            self.position_line(),
            self.angles_line(),
            self.front_line(),
            self.zoom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let info = CameraInfo::from_camera(&FlyCamera::new(Vec3::new(0.0, 0.0, 3.0)));
        assert_eq!(info.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(info.yaw, -90.0);
        assert_eq!(info.pitch, 0.0);
        assert!((info.front - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(info.zoom, 45.0);
    }

    #[test]
    fn follows_mouse_look() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(100.0, 50.0, true);
        let info = CameraInfo::from_camera(&camera);
        assert!((info.yaw - -80.0).abs() < 1e-4);
        assert!((info.pitch - 5.0).abs() < 1e-4);
    }

    #[test]
    fn display_lines() {
        let info = CameraInfo::from_camera(&FlyCamera::new(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(info.position_line(), "Position: (1.00, 2.00, 3.00)");
        assert_eq!(info.angles_line(), "(Yaw, Pitch): (-90.00, 0.00)");
        let s = format!("{info}");
        assert!(s.contains("Position: (1.00, 2.00, 3.00)"));
        assert!(s.contains("fov=45.0"));
    }
}
