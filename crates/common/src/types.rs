use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    /// Model matrix: translate, then rotate, then scale (applied right to left).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Every 2D texture the scene samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureId {
    CrateDiffuse,
    CrateSpecular,
    LegDiffuse,
    Soil,
    Planter,
    CupDiffuse,
    Grass,
}

impl TextureId {
    pub const ALL: [TextureId; 7] = [
        TextureId::CrateDiffuse,
        TextureId::CrateSpecular,
        TextureId::LegDiffuse,
        TextureId::Soil,
        TextureId::Planter,
        TextureId::CupDiffuse,
        TextureId::Grass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextureId::CrateDiffuse => "crate_diffuse",
            TextureId::CrateSpecular => "crate_specular",
            TextureId::LegDiffuse => "leg_diffuse",
            TextureId::Soil => "soil",
            TextureId::Planter => "planter",
            TextureId::CupDiffuse => "cup_diffuse",
            TextureId::Grass => "grass",
        }
    }
}
