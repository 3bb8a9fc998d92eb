//! Where everything sits on the table and what it is textured with.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tabletop_common::{TextureId, Transform};

use crate::state::ProgramState;

pub const PLATFORM_POSITION: Vec3 = Vec3::new(-1.0, -1.0, -4.5);
pub const PLATFORM_SCALE: Vec3 = Vec3::new(15.0, 2.0, 15.0);

pub const LEG_POSITIONS: [Vec3; 4] = [
    Vec3::new(-7.0, -8.0, -10.5),
    Vec3::new(-7.0, -8.0, 1.6),
    Vec3::new(5.0, -8.0, -10.5),
    Vec3::new(5.0, -8.0, 1.6),
];
pub const LEG_SCALE: Vec3 = Vec3::new(2.0, 15.0, 2.0);

pub const POT_POSITION: Vec3 = Vec3::new(0.0, 1.25, 1.0);
pub const POT_SCALE: f32 = 2.5;

/// Soil rests on the top face of the pot.
pub const LAND_LIFT: f32 = 1.28;
pub const LAND_SCALE: Vec3 = Vec3::new(2.5, 0.05, 2.5);

pub const GRASS_POSITION: Vec3 = Vec3::new(-1.0, 5.3, 3.8);
/// Radians.
pub const GRASS_YAW: f32 = 45.0;
pub const GRASS_SCALE: f32 = 5.5;

/// Every drawable thing in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SceneObject {
    Cup,
    Platform,
    Leg(u8),
    Pot,
    Land,
    Grass,
    Skybox,
}

/// Diffuse and optional specular map for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub diffuse: TextureId,
    pub specular: Option<TextureId>,
}

impl SceneObject {
    pub const LEG_COUNT: u8 = 4;

    /// Opaque cube-mesh objects in draw order.
    pub fn furniture() -> impl Iterator<Item = SceneObject> {
        std::iter::once(SceneObject::Platform)
            .chain((0..Self::LEG_COUNT).map(SceneObject::Leg))
            .chain([SceneObject::Pot, SceneObject::Land])
    }

    /// Everything except the skybox, which has no model transform.
    pub fn placed() -> impl Iterator<Item = SceneObject> {
        std::iter::once(SceneObject::Cup)
            .chain(Self::furniture())
            .chain(std::iter::once(SceneObject::Grass))
    }

    pub fn name(&self) -> String {
        match self {
            SceneObject::Cup => "cup".into(),
            SceneObject::Platform => "platform".into(),
            SceneObject::Leg(i) => format!("leg{i}"),
            SceneObject::Pot => "pot".into(),
            SceneObject::Land => "land".into(),
            SceneObject::Grass => "grass".into(),
            SceneObject::Skybox => "skybox".into(),
        }
    }

    /// Fixed placement of the object. The cup follows `state`.
    pub fn transform(&self, state: &ProgramState) -> Transform {
        match *self {
            SceneObject::Cup => state.cup_transform(),
            SceneObject::Platform => {
                Transform::from_position(PLATFORM_POSITION).with_scale(PLATFORM_SCALE)
            }
            SceneObject::Leg(i) => {
                let slot = usize::from(i) % LEG_POSITIONS.len();
                Transform::from_position(LEG_POSITIONS[slot]).with_scale(LEG_SCALE)
            }
            SceneObject::Pot => Transform::from_position(POT_POSITION).with_uniform_scale(POT_SCALE),
            SceneObject::Land => Transform::from_position(POT_POSITION + Vec3::Y * LAND_LIFT)
                .with_scale(LAND_SCALE),
            SceneObject::Grass => Transform::from_position(GRASS_POSITION)
                .with_rotation(Quat::from_rotation_y(GRASS_YAW))
                .with_uniform_scale(GRASS_SCALE),
            SceneObject::Skybox => Transform::default(),
        }
    }

    pub fn model_matrix(&self, state: &ProgramState) -> Mat4 {
        self.transform(state).matrix()
    }

    /// Textures sampled by the object. The skybox samples the cube map instead.
    pub fn material(&self) -> Option<Material> {
        let material = match self {
            SceneObject::Cup => Material {
                diffuse: TextureId::CupDiffuse,
                specular: None,
            },
            SceneObject::Platform => Material {
                diffuse: TextureId::CrateDiffuse,
                specular: Some(TextureId::CrateSpecular),
            },
            SceneObject::Leg(_) => Material {
                diffuse: TextureId::LegDiffuse,
                specular: None,
            },
            SceneObject::Pot => Material {
                diffuse: TextureId::Planter,
                specular: None,
            },
            SceneObject::Land => Material {
                diffuse: TextureId::Soil,
                specular: None,
            },
            SceneObject::Grass => Material {
                diffuse: TextureId::Grass,
                specular: None,
            },
            SceneObject::Skybox => return None,
        };
        Some(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furniture_order() {
        let objects: Vec<_> = SceneObject::furniture().collect();
        assert_eq!(objects.first(), Some(&SceneObject::Platform));
        assert_eq!(objects.len(), 7);
        assert_eq!(objects.last(), Some(&SceneObject::Land));
    }

    #[test]
    fn placed_excludes_skybox() {
        assert!(SceneObject::placed().all(|o| o != SceneObject::Skybox));
        assert_eq!(SceneObject::placed().count(), 9);
    }

    #[test]
    fn legs_sit_under_platform_corners() {
        let state = ProgramState::default();
        for i in 0..SceneObject::LEG_COUNT {
            let t = SceneObject::Leg(i).transform(&state);
            assert_eq!(t.scale, LEG_SCALE);
            assert!(t.position.y < PLATFORM_POSITION.y);
        }
    }

    #[test]
    fn land_rests_on_pot() {
        let state = ProgramState::default();
        let pot = SceneObject::Pot.transform(&state);
        let land = SceneObject::Land.transform(&state);
        assert_eq!(land.position.x, pot.position.x);
        assert_eq!(land.position.z, pot.position.z);
        let pot_top = pot.position.y + pot.scale.y * 0.5;
        let land_bottom = land.position.y - land.scale.y * 0.5;
        assert!(land_bottom >= pot_top);
        assert!(land_bottom - pot_top < 0.01);
    }

    #[test]
    fn cup_follows_state() {
        let mut state = ProgramState::default();
        state.cup_position = Vec3::new(1.0, 2.0, 3.0);
        state.cup_scale = 2.0;
        let m = SceneObject::Cup.model_matrix(&state);
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn only_platform_has_specular_map() {
        for obj in SceneObject::placed() {
            let mat = obj.material().unwrap();
            assert_eq!(mat.specular.is_some(), obj == SceneObject::Platform);
        }
        assert!(SceneObject::Skybox.material().is_none());
    }

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<_> = SceneObject::placed().map(|o| o.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }
}
