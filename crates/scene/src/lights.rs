use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::FlyCamera;

/// Specular exponent shared by every forward-lit material.
pub const MATERIAL_SHININESS: f32 = 32.0;

/// Distance falloff `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Falloff factor at `distance`. A zero denominator yields no light.
    pub fn factor(&self, distance: f32) -> f32 {
        let denom = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denom <= f32::EPSILON { 0.0 } else { 1.0 / denom }
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::new(1.0, 0.09, 0.032)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.15),
            specular: Vec3::splat(0.3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 4.0, 0.0),
            ambient: Vec3::splat(0.5),
            diffuse: Vec3::splat(1.0),
            specular: Vec3::splat(1.5),
            attenuation: Attenuation::default(),
        }
    }
}

/// Flashlight attached to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

impl SpotLight {
    pub const INNER_ANGLE_DEG: f32 = 12.5;
    pub const OUTER_ANGLE_DEG: f32 = 15.0;

    /// Spotlight at the camera eye. When disabled it stays bound but emits nothing.
    pub fn from_camera(camera: &FlyCamera, enabled: bool) -> Self {
        let intensity = if enabled { Vec3::ONE } else { Vec3::ZERO };
        Self {
            position: camera.position,
            direction: camera.front(),
            ambient: Vec3::ZERO,
            diffuse: intensity,
            specular: intensity,
            attenuation: Attenuation::default(),
            cut_off: Self::INNER_ANGLE_DEG.to_radians().cos(),
            outer_cut_off: Self::OUTER_ANGLE_DEG.to_radians().cos(),
        }
    }

    /// Soft-edged cone factor for a fragment seen along `light_to_fragment`.
    pub fn cone_intensity(&self, light_to_fragment: Vec3) -> f32 {
        let theta = light_to_fragment.normalize_or_zero().dot(self.direction.normalize_or_zero());
        let epsilon = self.cut_off - self.outer_cut_off;
        ((theta - self.outer_cut_off) / epsilon).clamp(0.0, 1.0)
    }
}

/// The single light resolved by the deferred lighting pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredLight {
    pub position: Vec3,
    pub color: Vec3,
    pub linear: f32,
    pub quadratic: f32,
}

impl DeferredLight {
    pub const COLOR: Vec3 = Vec3::splat(0.5);
    pub const LINEAR: f32 = 0.7;
    pub const QUADRATIC: f32 = 1.8;

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: Self::COLOR,
            linear: Self::LINEAR,
            quadratic: Self::QUADRATIC,
        }
    }

    pub fn attenuation(&self) -> Attenuation {
        Attenuation::new(1.0, self.linear, self.quadratic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuation_is_one_at_origin() {
        assert_eq!(Attenuation::default().factor(0.0), 1.0);
    }

    #[test]
    fn attenuation_falls_off() {
        let att = Attenuation::default();
        let near = att.factor(1.0);
        let far = att.factor(10.0);
        assert!(near > far);
        assert!((far - 1.0 / (1.0 + 0.9 + 3.2)).abs() < 1e-6);
    }

    #[test]
    fn degenerate_attenuation_emits_nothing() {
        assert_eq!(Attenuation::new(0.0, 0.0, 0.0).factor(5.0), 0.0);
    }

    #[test]
    fn disabled_spotlight_is_dark() {
        let cam = FlyCamera::new(Vec3::new(0.0, 0.0, 3.0));
        let spot = SpotLight::from_camera(&cam, false);
        assert_eq!(spot.diffuse, Vec3::ZERO);
        assert_eq!(spot.specular, Vec3::ZERO);
        assert_eq!(spot.position, cam.position);

        let lit = SpotLight::from_camera(&cam, true);
        assert_eq!(lit.diffuse, Vec3::ONE);
        assert!(lit.cut_off > lit.outer_cut_off);
    }

    #[test]
    fn spotlight_cone_edges() {
        let cam = FlyCamera::default();
        let spot = SpotLight::from_camera(&cam, true);
        assert_eq!(spot.cone_intensity(cam.front()), 1.0);
        assert_eq!(spot.cone_intensity(cam.right()), 0.0);
    }

    #[test]
    fn deferred_light_uses_steep_falloff() {
        let light = DeferredLight::at(Vec3::new(4.0, 4.0, 0.0));
        assert_eq!(light.color, Vec3::splat(0.5));
        assert!(light.attenuation().factor(2.0) < Attenuation::default().factor(2.0));
    }
}
